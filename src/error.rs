//! Error types for ndbin

use std::io;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, NdbinError>;

/// ndbin-specific error type
///
/// Every fallible operation returns one of these directly; there is no
/// shared error state between calls.
#[derive(Debug, Error)]
pub enum NdbinError {
    /// Buffer reservation failed
    #[error("out of memory: failed to allocate {requested} bytes")]
    OutOfMemory { requested: usize },

    /// Rank or extent violation on reshape, indexing, or deserialization
    #[error("dimension error: {message}")]
    Dimension { message: String },

    /// Algebra operand with the wrong shape or element type
    #[error("shape error: {message}")]
    Shape { message: String },

    /// Malformed binary header
    #[error("format error: {message}")]
    Format { message: String },

    /// Short read/write against the underlying stream
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl NdbinError {
    pub fn dimension(message: impl Into<String>) -> Self {
        NdbinError::Dimension {
            message: message.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        NdbinError::Shape {
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        NdbinError::Format {
            message: message.into(),
        }
    }
}
