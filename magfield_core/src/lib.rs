//! # magfield_core
//!
//! Pure lookup mathematics for precomputed magnetic field maps.
//!
//! This crate holds everything about a field map that does not touch a file or
//! a cache: uniformly spaced coordinate axes, the composite (flat) index of the
//! sample array, interpolation weights, and the sector symmetry used by toroid
//! maps that store a single wedge of the full circle.
//!
//! ## Features
//!
//! - **no_std compatible**: only `alloc` is required (for the sector tables)
//! - **Branch-light hot paths**: `GridAxis::index_of` and `CompositeIndex::pack`
//!   are called on every cache miss of a tracking loop
//! - **f64 geometry, f32 samples**: coordinates are resolved in double precision,
//!   stored samples stay in the map's native `f32`
//!
//! ## Modules
//!
//! - [`types`]: `Point3`, `FieldVector`
//! - [`axis`]: `GridAxis`, the uniform 1-D coordinate axis
//! - [`index`]: `CompositeIndex`, triple ↔ flat offset mapping
//! - [`coords`]: Cartesian ↔ cylindrical conversions (degrees)
//! - [`interpolation`]: corner ordering, nearest-corner selection, multilinear weights
//! - [`symmetry`]: `SectorSymmetry`, folding an angle into the stored wedge
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```
//! use magfield_core::prelude::*;
//!
//! let rho = GridAxis::new("rho", 0.0, 500.0, 251).unwrap();
//! assert_eq!(rho.index_of(3.0), Some(1));
//!
//! let shape = CompositeIndex::new(16, 251, 251);
//! let flat = shape.pack(3, 10, 7);
//! assert_eq!(shape.unpack(flat), Some((3, 10, 7)));
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod axis;
pub mod coords;
pub mod error;
pub mod index;
pub mod interpolation;
pub mod symmetry;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::axis::GridAxis;
    pub use crate::coords::{cylindrical_to_cartesian, normalize_degrees, to_cylindrical};
    pub use crate::error::CoreError;
    pub use crate::index::CompositeIndex;
    pub use crate::interpolation::{
        bilinear_weights, blend, corner_from_index_2d, corner_from_index_3d, nearest_corner_2d,
        nearest_corner_3d, trilinear_weights, Interpolation,
    };
    pub use crate::symmetry::{Fold, SectorSymmetry};
    pub use crate::types::{Cylindrical, FieldVector, Point3};
}

// Re-export everything at crate root for convenience
pub use axis::GridAxis;
pub use coords::{cylindrical_to_cartesian, normalize_degrees, rotate_xy, to_cylindrical};
pub use error::CoreError;
pub use index::CompositeIndex;
pub use interpolation::{
    bilinear_weights, blend, corner_from_index_2d, corner_from_index_3d, nearest_corner_2d,
    nearest_corner_3d, trilinear_weights, Interpolation,
};
pub use symmetry::{Fold, SectorSymmetry};
pub use types::{Cylindrical, FieldVector, Point3};
