//! Glob-based exclude patterns.
//!
//! Patterns hide streams from list and TUI output only; the underlying
//! catalog is never modified by exclusion.

use glob::Pattern;

/// Compile glob patterns, warning about and skipping invalid ones.
pub fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                eprintln!("Warning: Ignoring invalid exclude pattern '{}': {}", p, e);
                None
            }
        })
        .collect()
}

/// Check whether a stream name matches any exclude pattern.
pub fn is_excluded(name: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|p| p.matches(name))
}

/// Indices of streams whose names survive the exclude patterns.
pub fn visible_indices<'a, I>(names: I, patterns: &[Pattern]) -> Vec<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .enumerate()
        .filter(|(_, name)| !is_excluded(name, patterns))
        .map(|(i, _)| i)
        .collect()
}
