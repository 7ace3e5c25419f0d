//! Field map file format support.
//!
//! A field map file is a fixed 80-byte header followed by the flat array of
//! sample vectors. Files are big-endian on disk; byte-swapped files are
//! detected from the magic word and read transparently.
//!
//! # Example
//!
//! ```no_run
//! use magfield_io::format::{load, ByteOrder};
//!
//! let map = load("solenoid.dat")?;
//! println!("{} samples, written {:?}", map.samples.len(), map.byte_order);
//! assert!(map.byte_order == ByteOrder::Big || map.byte_order == ByteOrder::Little);
//! # Ok::<(), magfield_io::DecodeError>(())
//! ```

pub mod codec;
pub mod header;

pub use codec::{
    decode, encode, load, read_map, save_to_file, validate_header, write_map, DecodedMap,
};
pub use header::{
    expected_file_size, AxisSpec, ByteOrder, FieldMapHeader, HEADER_SIZE, MAGIC_WORD,
    SAMPLE_SIZE,
};
