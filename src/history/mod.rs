//! History module for sth.
//!
//! The persisted catalog of stream sources: an ordered list of records
//! with name-unique inserts, lookup and removal by name, and JSON
//! persistence.

mod store;

pub use store::{AddOutcome, History};
