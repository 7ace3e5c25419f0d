//! Error types for magfield_core operations.
//!
//! Provides a simple error enum with no external dependencies for no_std compatibility.

use core::fmt;

/// Error types that can occur while building the lookup structures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreError {
    /// An axis was declared with zero sample points.
    EmptyAxis {
        /// The axis name, e.g. `"rho"`.
        name: &'static str,
    },
    /// An axis has non-finite bounds, `max < min`, or a zero span with more than one point.
    InvalidBounds {
        /// The axis name.
        name: &'static str,
        /// Declared minimum.
        min: f64,
        /// Declared maximum.
        max: f64,
    },
    /// A symmetric wedge does not start at zero degrees.
    WedgeNotAnchored {
        /// The declared wedge start in degrees.
        min: f64,
    },
    /// Twice the wedge width does not divide 360 degrees.
    WedgeDoesNotTile {
        /// The declared wedge width in degrees.
        width: f64,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::EmptyAxis { name } => write!(f, "axis {} has no points", name),
            CoreError::InvalidBounds { name, min, max } => {
                write!(f, "axis {} has invalid bounds [{}, {}]", name, min, max)
            }
            CoreError::WedgeNotAnchored { min } => {
                write!(f, "symmetric wedge must start at 0 degrees, starts at {}", min)
            }
            CoreError::WedgeDoesNotTile { width } => {
                write!(f, "wedge of {} degrees does not tile the circle", width)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
