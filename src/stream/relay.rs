//! Relay URL derivation and scheme checks.
//!
//! A relayed stream is re-published by an external media server under
//! its name; the playback URL is derived from a configured base rather
//! than from the origin URL.

/// Default base for relayed playback URLs.
pub const DEFAULT_RTSP_BASE: &str = "rtsp://127.0.0.1:5544/live/";

/// Default base for the HLS variant of a relayed stream.
pub const DEFAULT_HLS_BASE: &str = "http://127.0.0.1:8080/hls/";

/// URL schemes recognized as stream sources.
pub const KNOWN_SCHEMES: &[&str] = &["rtsp", "rtsps", "rtmp", "http", "https"];

/// Derive the relayed playback URL for a stream name.
pub fn playback_url(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// Derive the HLS playlist URL for a stream name.
pub fn hls_url(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{name}.m3u8")
    } else {
        format!("{base}/{name}.m3u8")
    }
}

/// Extract the scheme from a URL, if it has one.
pub fn url_scheme(url: &str) -> Option<&str> {
    let (scheme, _) = url.split_once("://")?;
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+') {
        return None;
    }
    Some(scheme)
}

/// Check whether a scheme is a recognized stream scheme.
pub fn is_known_scheme(scheme: &str) -> bool {
    KNOWN_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
}
