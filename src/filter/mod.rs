//! Filter module for sth.
//!
//! Provides fuzzy matching over stream names and URLs, and glob-based
//! exclude patterns for hiding entries from display.

mod exclude;
mod fuzzy;

pub use exclude::{compile_patterns, is_excluded, visible_indices};
pub use fuzzy::{filter_streams, get_match_indices, match_score, matches, FuzzyMatcher};
