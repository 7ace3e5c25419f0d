//! Core value types: query points and field vectors.

use core::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A Cartesian point in map length units (centimetres after normalisation).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3 {
    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Rotate the point about the z axis by `degrees`.
    #[inline]
    pub fn rotate_z(self, degrees: f64) -> Self {
        let (s, c) = libm::sincos(degrees.to_radians());
        Self {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
            z: self.z,
        }
    }
}

impl From<[f64; 3]> for Point3 {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<(f64, f64, f64)> for Point3 {
    #[inline]
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// A point expressed in the map's native cylindrical frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cylindrical {
    /// Azimuth in degrees, normalised to `[0, 360)`.
    pub phi: f64,
    /// Distance from the beam (z) axis.
    pub rho: f64,
    /// Position along the beam axis.
    pub z: f64,
}

/// A single sampled or queried field vector.
///
/// Stored samples carry the map's native components (`b1, b2, b3`), whose
/// meaning depends on the field coordinate system declared in the file:
/// `(Bphi, Brho, Bz)` for cylindrical maps and `(Bx, By, Bz)` for Cartesian
/// ones. Everything returned by a query is Cartesian `(Bx, By, Bz)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct FieldVector {
    /// First component.
    pub b1: f32,
    /// Second component.
    pub b2: f32,
    /// Third component.
    pub b3: f32,
}

impl FieldVector {
    /// The zero field, returned for every point outside a map.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new field vector.
    #[inline]
    pub const fn new(b1: f32, b2: f32, b3: f32) -> Self {
        Self { b1, b2, b3 }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f32; 3] {
        [self.b1, self.b2, self.b3]
    }

    /// Magnitude, accumulated in double precision.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        let b1 = self.b1 as f64;
        let b2 = self.b2 as f64;
        let b3 = self.b3 as f64;
        libm::sqrt(b1 * b1 + b2 * b2 + b3 * b3)
    }

    /// True if every component is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.b1 == 0.0 && self.b2 == 0.0 && self.b3 == 0.0
    }

    /// Multiply every component by `factor`.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.b1 * factor, self.b2 * factor, self.b3 * factor)
    }
}

impl From<[f32; 3]> for FieldVector {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<FieldVector> for [f32; 3] {
    #[inline]
    fn from(v: FieldVector) -> Self {
        v.as_array()
    }
}

impl Add for FieldVector {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.b1 + other.b1, self.b2 + other.b2, self.b3 + other.b3)
    }
}

impl AddAssign for FieldVector {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.b1 += other.b1;
        self.b2 += other.b2;
        self.b3 += other.b3;
    }
}

impl Sub for FieldVector {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.b1 - other.b1, self.b2 - other.b2, self.b3 - other.b3)
    }
}

impl Mul<f32> for FieldVector {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f32) -> Self {
        self.scaled(factor)
    }
}

impl Neg for FieldVector {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.b1, -self.b2, -self.b3)
    }
}
