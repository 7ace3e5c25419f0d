//! # magfield
//!
//! Fast magnetic field map queries for particle tracking.
//!
//! A field map is a precomputed grid of field vectors over cylindrical
//! `(φ, ρ, z)` coordinates, stored either for an axisymmetric solenoid (a
//! single φ plane) or a sectored toroid (a φ range, often a single symmetric
//! wedge). This crate loads such maps and answers "what is `(Bx, By, Bz)` at
//! Cartesian `(x, y, z)`?" millions of times per second:
//!
//! - **Symmetry folding**: a wedge toroid stores 1/(2S) of the circle; queries
//!   elsewhere are folded into the wedge, mirrored and rotated back
//! - **Cell cache**: the corners of the last queried cell are kept, so
//!   successive points along a track cost a bounds check
//! - **Shared maps**: a [`FieldMap`] is immutable during queries; each worker
//!   owns a [`FieldProbe`] holding its cache
//!
//! ## Quick Start
//!
//! ```no_run
//! use magfield::{composite_field_at, FieldMap, Point3};
//!
//! let solenoid = FieldMap::load_from_file("solenoid.dat")?;
//! let toroid = FieldMap::load_from_file("toroid.dat")?;
//!
//! // One-off query
//! let b = solenoid.field_at(Point3::new(10.0, 0.0, 50.0));
//! println!("B = ({}, {}, {}) kG", b.b1, b.b2, b.b3);
//!
//! // Both magnets at once
//! let total = composite_field_at(&[&solenoid, &toroid], Point3::new(200.0, 50.0, 300.0));
//!
//! // Tracking loop with a cached probe
//! let mut probe = toroid.probe();
//! let mut point = Point3::new(200.0, 0.0, 300.0);
//! for _ in 0..1000 {
//!     let b = probe.field(point);
//!     point.z += 0.1;
//! }
//! # Ok::<(), magfield::MagError>(())
//! ```
//!
//! ## Units
//!
//! Whatever the file declares, a loaded map works in centimetres, degrees and
//! kilogauss. Query results are Cartesian.
//!
//! ## Feature Flags
//!
//! - `rayon`: `FieldMap::field_batch_par`, parallel batch queries

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod cell;
mod composite;
mod error;
mod map;
mod probe;
mod query;

pub use builder::{AxisRange, FieldMapBuilder};
pub use cell::InterpolationCell;
pub use composite::{composite_field_at, CompositeProbe};
pub use error::{MagError, Result};
pub use map::{FieldMap, Topology};
pub use probe::FieldProbe;

// Re-export the types that appear in the query API
pub use magfield_core::{
    CoreError, Cylindrical, FieldVector, Fold, GridAxis, Interpolation, Point3, SectorSymmetry,
};
pub use magfield_io::{
    ByteOrder, CoordinateSystem, DecodeError, FieldMetrics, MapConfig,
};

/// Prelude module for convenient imports.
///
/// ```
/// use magfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::builder::FieldMapBuilder;
    pub use crate::composite::{composite_field_at, CompositeProbe};
    pub use crate::error::{MagError, Result};
    pub use crate::map::{FieldMap, Topology};
    pub use crate::probe::FieldProbe;

    pub use magfield_core::{FieldVector, Interpolation, Point3};
    pub use magfield_io::{ByteOrder, MapConfig};
}
