//! magfield_io - binary format, units and load-time statistics for field maps.
//!
//! This crate turns a field map file into validated header data and a flat
//! sample array, and back. It knows nothing about queries; the `magfield`
//! crate builds lookup structures on top of a [`DecodedMap`].
//!
//! # Core Types
//!
//! - [`FieldMapHeader`]: the fixed 80-byte header
//! - [`ByteOrder`]: byte order detected from the magic word, local to one load
//! - [`DecodedMap`]: header, interpreted units and samples of one file
//! - [`FieldMetrics`]: largest and mean sample magnitude
//! - [`MapConfig`]: scale, shift and interpolation mode of a loaded map
//!
//! # Example
//!
//! ```
//! use magfield_io::{decode, encode, AxisSpec, ByteOrder, FieldMapHeader, FieldVector};
//!
//! let header = FieldMapHeader::new([
//!     AxisSpec::new(0.0, 0.0, 1),
//!     AxisSpec::new(0.0, 10.0, 2),
//!     AxisSpec::new(-5.0, 5.0, 2),
//! ]);
//! let samples = vec![FieldVector::new(0.0, 0.0, 20.0); 4];
//!
//! let bytes = encode(&header, &samples, ByteOrder::Little)?;
//! let map = decode(&bytes)?;
//! assert_eq!(map.byte_order, ByteOrder::Little);
//! assert_eq!(map.samples, samples);
//! # Ok::<(), magfield_io::DecodeError>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod metrics;
pub mod units;

// Re-export core types from magfield_core
pub use magfield_core::{FieldVector, Interpolation, Point3};

// Re-export main types
pub use config::MapConfig;
pub use error::{DecodeError, Result};
pub use format::{
    decode, encode, expected_file_size, load, read_map, save_to_file, validate_header, write_map,
    AxisSpec, ByteOrder, DecodedMap, FieldMapHeader, HEADER_SIZE, MAGIC_WORD, SAMPLE_SIZE,
};
pub use metrics::{compute_metrics, FieldMetrics};
pub use units::{AngleUnit, CoordinateSystem, FieldUnit, LengthUnit, MapUnits};
