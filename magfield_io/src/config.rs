//! Per-map query configuration.

use magfield_core::Interpolation;

/// Query parameters of one field map.
///
/// Applied on every query: the shift is subtracted from the query point, the
/// cell is sampled with `interpolation`, and the result is multiplied by
/// `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Field scale factor (e.g. ratio of operating to nominal current).
    pub scale: f32,
    /// Position of the map origin in the query frame, in cm.
    pub shift: [f32; 3],
    /// How cell corners are combined.
    pub interpolation: Interpolation,
}

impl MapConfig {
    /// Create a configuration.
    #[inline]
    pub const fn new(scale: f32, shift: [f32; 3], interpolation: Interpolation) -> Self {
        Self {
            scale,
            shift,
            interpolation,
        }
    }

    /// Set the field scale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the map origin shift in cm.
    pub fn with_shift(mut self, shift: [f32; 3]) -> Self {
        self.shift = shift;
        self
    }

    /// Set the interpolation mode.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            shift: [0.0; 3],
            interpolation: Interpolation::NearestNeighbor,
        }
    }
}
