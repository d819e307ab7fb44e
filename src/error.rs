//! Error types for chipfield.

use crate::chip::ChipId;
use std::fmt;

/// Result type alias for chipfield operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chipfield operations.
///
/// Most buffer-level problems are recovered locally (ranges are clamped and
/// logged); these variants surface where a caller asked for a strict check or
/// supplied configuration that can never be valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A range fell outside `[0, len]` or had `start > end`.
    OutOfRange { start: usize, end: usize, len: usize },
    /// A terminator behavior code that maps to no behavior.
    UnknownBehavior(i32),
    /// No chip with this id is present in the buffer.
    UnknownChip(ChipId),
    /// Invalid color format (e.g., malformed hex string).
    InvalidColor(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { start, end, len } => {
                write!(f, "range {start}..{end} out of bounds for text of length {len}")
            }
            Self::UnknownBehavior(code) => write!(f, "unknown terminator behavior code: {code}"),
            Self::UnknownChip(id) => write!(f, "no chip with id {id} in text"),
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
        }
    }
}

impl std::error::Error for Error {}
