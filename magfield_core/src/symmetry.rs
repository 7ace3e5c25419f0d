//! Sector symmetry of toroid maps.
//!
//! A toroid with `S` identical coils is stored as a single half-sector wedge
//! `[0, W]` in φ. The full circle is tiled by `S` sectors of period `P = 2W`,
//! each sector being the stored wedge plus its mirror image across the
//! sector mid-plane. A query angle is folded into the wedge, looked up there,
//! and the resulting vector is mirrored and rotated back.

use alloc::vec::Vec;

use crate::coords::rotate_xy;
use crate::error::CoreError;
use crate::types::FieldVector;

/// Tolerance used when checking wedge bounds declared as `f32` in a file.
const ANGLE_TOLERANCE: f64 = 1e-4;

/// Result of folding an azimuth into the stored wedge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fold {
    /// Sector number `k` in `[0, S)`; the sector is centred on `k * P`.
    pub sector: usize,
    /// Angle inside the stored wedge, `[0, W]` degrees.
    pub local_phi: f64,
    /// True if the query lay on the mirrored half of its sector.
    pub mirrored: bool,
}

/// Folding rule and rotation table for a wedge-symmetric toroid.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorSymmetry {
    width: f64,
    period: f64,
    /// `(cos, sin)` of `k * P` for each sector.
    rotations: Vec<(f64, f64)>,
}

impl SectorSymmetry {
    /// Build the symmetry of a wedge stored as φ in `[min, max]` degrees.
    ///
    /// # Errors
    /// * `WedgeNotAnchored` if `min` is not 0
    /// * `WedgeDoesNotTile` if `360 / (2 * (max - min))` is not a positive integer
    pub fn from_wedge(min: f64, max: f64) -> Result<Self, CoreError> {
        if !(libm::fabs(min) <= ANGLE_TOLERANCE) {
            return Err(CoreError::WedgeNotAnchored { min });
        }

        let width = max - min;
        if !(width > 0.0) || width > 180.0 + ANGLE_TOLERANCE {
            return Err(CoreError::WedgeDoesNotTile { width });
        }

        let ratio = 360.0 / (2.0 * width);
        let sectors = libm::round(ratio);
        if libm::fabs(ratio - sectors) > ANGLE_TOLERANCE * ratio || sectors < 1.0 {
            return Err(CoreError::WedgeDoesNotTile { width });
        }

        let sectors = sectors as usize;
        // snap to the exact tiling so sector boundaries are consistent
        let period = 360.0 / sectors as f64;
        let rotations = (0..sectors)
            .map(|k| {
                let (s, c) = libm::sincos((k as f64 * period).to_radians());
                (c, s)
            })
            .collect();

        Ok(Self {
            width: period / 2.0,
            period,
            rotations,
        })
    }

    /// Wedge width `W` in degrees.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sector period `P = 2W` in degrees.
    #[inline]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Number of sectors `S = 360 / P`.
    #[inline]
    pub fn sectors(&self) -> usize {
        self.rotations.len()
    }

    /// Fold an azimuth in `[0, 360)` degrees into the stored wedge.
    #[inline]
    pub fn fold(&self, phi: f64) -> Fold {
        let k = libm::round(phi / self.period);
        let relative = phi - k * self.period;
        let mirrored = relative < 0.0;
        let local_phi = libm::fabs(relative).min(self.width);

        // k == S for angles just below 360
        let sector = (k as usize) % self.rotations.len();

        Fold {
            sector,
            local_phi,
            mirrored,
        }
    }

    /// Map a Cartesian vector looked up at `fold.local_phi` back to the
    /// query's sector.
    ///
    /// A mirror across the sector mid-plane reverses the in-plane component
    /// along the mid-plane and the axial component of the (axial) field
    /// vector; the sector rotation then turns `(Bx, By)` by `k * P`.
    #[inline]
    pub fn unfold(&self, fold: &Fold, local: FieldVector) -> FieldVector {
        let v = if fold.mirrored {
            FieldVector::new(-local.b1, local.b2, -local.b3)
        } else {
            local
        };
        match self.rotations.get(fold.sector) {
            Some(&(cos, sin)) if fold.sector != 0 => rotate_xy(v, cos, sin),
            _ => v,
        }
    }
}
