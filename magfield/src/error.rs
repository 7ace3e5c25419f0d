//! Error types for magfield operations.
//!
//! Load and construction failures only; queries never fail (points outside a
//! map read as the zero field).

use magfield_core::CoreError;
use magfield_io::DecodeError;
use thiserror::Error;

/// Errors that can occur while loading or building a field map.
#[derive(Error, Debug)]
pub enum MagError {
    /// The file could not be read or is not a valid field map file.
    #[error("failed to decode field map: {0}")]
    Decode(#[from] DecodeError),

    /// The file is well-formed but describes a grid this engine cannot query.
    #[error("unsupported field map layout: {message}")]
    UnsupportedLayout {
        /// Description of the layout problem.
        message: String,
    },

    /// Axis or symmetry construction failed.
    #[error("invalid grid: {0}")]
    Core(#[from] CoreError),
}

impl MagError {
    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        MagError::UnsupportedLayout {
            message: message.into(),
        }
    }
}

/// Result type alias for magfield operations.
pub type Result<T> = std::result::Result<T, MagError>;
