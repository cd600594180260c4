//! Revision history parsing and grouping
//!
//! This crate provides:
//! - Revision record parsing (id, name pattern, timestamp)
//! - Per-parent grouping, chronologically sorted
//!
//! Rows that do not carry the revision name pattern are skipped; rows that
//! do but are otherwise malformed are errors.

pub mod group;
pub mod record;

// Re-exports
pub use group::{group, RevisionHistory};
pub use record::{parse_name, parse_timestamp, ParsedName, RevisionKind, RevisionRecord};

use thiserror::Error;

/// Errors produced while parsing revision rows
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A row matched the revision name pattern but its timestamp field
    /// could not be parsed. Coercing these to an epoch sentinel would
    /// silently sort the row first, so it is a hard error instead.
    #[error("revision {id}: unparseable timestamp {value:?}")]
    InvalidTimestamp { id: u64, value: String },

    /// A row matched the revision name pattern but its id field is not
    /// numeric.
    #[error("unparseable revision id {value:?} (name {name:?})")]
    InvalidId { value: String, name: String },
}
