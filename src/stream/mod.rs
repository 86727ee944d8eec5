//! Stream record types for sth.
//!
//! Defines the record shape stored in the history catalog and the
//! URL helpers for relayed streams.

mod relay;
mod types;

pub use relay::{
    hls_url, is_known_scheme, playback_url, url_scheme, DEFAULT_HLS_BASE, DEFAULT_RTSP_BASE,
    KNOWN_SCHEMES,
};
pub use types::{StreamRecord, StreamStatus};
