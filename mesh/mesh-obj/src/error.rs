//! Error types for OBJ loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for OBJ loading.
pub type ObjResult<T> = Result<T, ObjError>;

/// Errors that can occur while loading an OBJ file.
#[derive(Debug, Error)]
pub enum ObjError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Malformed record.
    #[error("invalid OBJ record on line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number.
        line: usize,
        /// Description of what was invalid.
        message: String,
    },

    /// A face references an element beyond the lists seen so far.
    #[error("index {index} out of range on line {line} (list has {count} entries)")]
    IndexOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The resolved index as written.
        index: i64,
        /// Length of the referenced list.
        count: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ObjError {
    /// Create an `InvalidRecord` error for the given line.
    #[must_use]
    pub fn invalid_record(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            message: message.into(),
        }
    }
}
