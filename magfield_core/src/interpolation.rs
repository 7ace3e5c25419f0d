//! Corner ordering and interpolation weights for a grid cell.
//!
//! Corners are numbered in binary with the slowest axis in the highest bit:
//! 3-D corner `c` sits at offsets `((c >> 2) & 1, (c >> 1) & 1, c & 1)` along
//! (φ, ρ, z), and 2-D corner `c` at `((c >> 1) & 1, c & 1)` along (ρ, z).
//!
//! Fractions are the per-axis position inside the cell, `(v - min) * norm`,
//! nominally in `[0, 1)`.

use crate::types::FieldVector;

/// How a cell turns its corner samples into one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Return the sample at the closest corner (ties go to the far corner).
    #[default]
    NearestNeighbor,
    /// Bilinear (2-D) or trilinear (3-D) blend of all corners.
    Linear,
}

impl Interpolation {
    /// Short lowercase name used in log events.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Interpolation::NearestNeighbor => "nearest",
            Interpolation::Linear => "linear",
        }
    }
}

/// Per-axis offsets of a 3-D corner.
#[inline]
pub const fn corner_from_index_3d(corner: usize) -> (usize, usize, usize) {
    ((corner >> 2) & 1, (corner >> 1) & 1, corner & 1)
}

/// Per-axis offsets of a 2-D corner.
#[inline]
pub const fn corner_from_index_2d(corner: usize) -> (usize, usize) {
    ((corner >> 1) & 1, corner & 1)
}

#[inline]
fn far(fraction: f64) -> usize {
    (fraction >= 0.5) as usize
}

/// Index of the corner nearest to the given 3-D fractions.
#[inline]
pub fn nearest_corner_3d(fractions: [f64; 3]) -> usize {
    (far(fractions[0]) << 2) | (far(fractions[1]) << 1) | far(fractions[2])
}

/// Index of the corner nearest to the given 2-D fractions.
#[inline]
pub fn nearest_corner_2d(fractions: [f64; 2]) -> usize {
    (far(fractions[0]) << 1) | far(fractions[1])
}

/// Bilinear weights of the four 2-D corners. They sum to 1.
#[inline]
pub fn bilinear_weights(fractions: [f64; 2]) -> [f64; 4] {
    let [u, v] = fractions;
    let (u0, v0) = (1.0 - u, 1.0 - v);
    [u0 * v0, u0 * v, u * v0, u * v]
}

/// Trilinear weights of the eight 3-D corners. They sum to 1.
#[inline]
pub fn trilinear_weights(fractions: [f64; 3]) -> [f64; 8] {
    let [u, v, w] = fractions;
    let (u0, v0, w0) = (1.0 - u, 1.0 - v, 1.0 - w);
    [
        u0 * v0 * w0,
        u0 * v0 * w,
        u0 * v * w0,
        u0 * v * w,
        u * v0 * w0,
        u * v0 * w,
        u * v * w0,
        u * v * w,
    ]
}

/// Weighted sum of corner samples, accumulated in double precision.
///
/// `corners` and `weights` are paired by position; extra entries in the
/// longer slice are ignored.
#[inline]
pub fn blend(corners: &[FieldVector], weights: &[f64]) -> FieldVector {
    let mut acc = [0.0f64; 3];
    for (corner, &weight) in corners.iter().zip(weights) {
        acc[0] += weight * corner.b1 as f64;
        acc[1] += weight * corner.b2 as f64;
        acc[2] += weight * corner.b3 as f64;
    }
    FieldVector::new(acc[0] as f32, acc[1] as f32, acc[2] as f32)
}
