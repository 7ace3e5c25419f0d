//! Cartesian ↔ cylindrical conversions.
//!
//! Angles are in degrees throughout, matching the stored φ axis after unit
//! normalisation.

use crate::types::{Cylindrical, FieldVector, Point3};

/// Wrap an angle in degrees into `[0, 360)`.
///
/// NaN stays NaN.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees - 360.0 * libm::floor(degrees / 360.0);
    // -1e-17 wraps to 360.0 after rounding
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Express a Cartesian point in the map's cylindrical frame.
///
/// φ is `atan2(y, x)` normalised to `[0, 360)`; on the z axis it is 0.
#[inline]
pub fn to_cylindrical(point: Point3) -> Cylindrical {
    let rho = libm::hypot(point.x, point.y);
    let phi = normalize_degrees(libm::atan2(point.y, point.x).to_degrees());
    Cylindrical {
        phi,
        rho,
        z: point.z,
    }
}

/// Rotate the in-plane `(b1, b2)` pair of a Cartesian vector by an angle whose
/// cosine and sine are given. `b3` is untouched.
#[inline]
pub fn rotate_xy(v: FieldVector, cos: f64, sin: f64) -> FieldVector {
    let bx = v.b1 as f64;
    let by = v.b2 as f64;
    FieldVector::new(
        (bx * cos - by * sin) as f32,
        (bx * sin + by * cos) as f32,
        v.b3,
    )
}

/// Convert cylindrical field components at azimuth `phi_degrees` into
/// Cartesian `(Bx, By, Bz)`.
///
/// `Bx = Bρ cosφ − Bφ sinφ`, `By = Bρ sinφ + Bφ cosφ`.
#[inline]
pub fn cylindrical_to_cartesian(b_rho: f32, b_phi: f32, b_z: f32, phi_degrees: f64) -> FieldVector {
    let (sin, cos) = libm::sincos(phi_degrees.to_radians());
    rotate_xy(FieldVector::new(b_rho, b_phi, b_z), cos, sin)
}
