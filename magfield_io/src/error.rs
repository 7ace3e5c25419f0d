//! Error types for magfield_io operations.

use thiserror::Error;

/// Errors that can occur while reading or writing a field map file.
///
/// Every variant is fatal for the load in progress; no partially decoded map
/// is ever returned alongside one.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The file could not be opened, sized, or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first word matches the magic word in neither byte order.
    #[error("bad magic word {found:#010x} (expected 0xced in either byte order)")]
    BadMagicWord {
        /// The first word as read big-endian.
        found: u32,
    },

    /// The file length disagrees with the grid dimensions in the header.
    #[error("file size mismatch: header declares {expected} bytes, file has {actual}")]
    SizeMismatch {
        /// `80 + 12 * N1 * N2 * N3`.
        expected: u64,
        /// Actual length in bytes.
        actual: u64,
    },

    /// A header field holds a value the decoder cannot use.
    #[error("invalid header field {field}: {message}")]
    InvalidHeader {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// The input is shorter than the fixed header.
    #[error("truncated file: {length} bytes is shorter than the 80-byte header")]
    Truncated {
        /// Length of the input in bytes.
        length: u64,
    },
}

impl DecodeError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        DecodeError::InvalidHeader {
            field,
            message: message.into(),
        }
    }
}

/// Result type alias for magfield_io operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
