//! Field map binary format read/write implementation.
//!
//! # Format Specification
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │ HEADER (80 bytes, twenty 4-byte words)                             │
//! ├────────────────────────────────────────────────────────────────────┤
//! │  0-3:   magic word 0xCED (u32)                                     │
//! │  4-11:  gridCS, fieldCS (u32)                                      │
//! │ 12-23:  lengthUnits, angleUnits, fieldUnits (u32)                  │
//! │ 24-35:  q1min, q1max (f32), nq1 (u32)           φ, slow            │
//! │ 36-47:  q2min, q2max (f32), nq2 (u32)           ρ                  │
//! │ 48-59:  q3min, q3max (f32), nq3 (u32)           z, fast            │
//! │ 60-67:  creation time high, low (i32)                              │
//! │ 68-79:  reserved                                                   │
//! ├────────────────────────────────────────────────────────────────────┤
//! │ SAMPLES (12 bytes each, nq1 * nq2 * nq3 of them)                   │
//! │  For each φ, for each ρ, for each z: (f32 b1, f32 b2, f32 b3)      │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every word is big-endian in a canonical file. A file whose magic word only
//! matches little-endian is read entirely little-endian.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use magfield_core::FieldVector;

use super::header::{
    expected_file_size, ByteOrder, FieldMapHeader, HEADER_SIZE, MAGIC_WORD, SAMPLE_SIZE,
};
use crate::error::{DecodeError, Result};
use crate::units::MapUnits;

const AXIS_NAMES: [(&str, &str, &str); 3] = [
    ("q1min", "q1max", "nq1"),
    ("q2min", "q2max", "nq2"),
    ("q3min", "q3max", "nq3"),
];

/// A validated file, samples still in the file's units.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMap {
    /// Header as stored.
    pub header: FieldMapHeader,
    /// Interpreted header tags.
    pub units: MapUnits,
    /// Byte order the file was written in.
    pub byte_order: ByteOrder,
    /// `N1 * N2 * N3` samples in composite-index order.
    pub samples: Vec<FieldVector>,
}

/// Decode a complete file image.
///
/// # Errors
/// See [`read_map`].
pub fn decode(bytes: &[u8]) -> Result<DecodedMap> {
    let mut reader = bytes;
    read_map(&mut reader, bytes.len() as u64)
}

/// Load a field map from a file path.
///
/// The declared grid size is checked against the file metadata before any
/// sample is read.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DecodedMap> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let length = file.metadata()?.len();
    log::debug!("load: path={} length={}", path.display(), length);
    read_map(&mut file, length)
}

/// Read a field map of `length` total bytes from `reader`.
///
/// # Errors
/// * `Truncated` if `length` is shorter than the header
/// * `BadMagicWord` if the first word is `0xCED` in neither byte order
/// * `SizeMismatch` if `length != 80 + 12 * N1 * N2 * N3`
/// * `InvalidHeader` for unknown tags or unusable axis bounds
/// * `Io` if the reader fails
pub fn read_map<R: Read>(reader: &mut R, length: u64) -> Result<DecodedMap> {
    if length < 4 {
        return Err(DecodeError::Truncated { length });
    }

    let mut header_bytes = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header_bytes[..4])?;
    let magic = [header_bytes[0], header_bytes[1], header_bytes[2], header_bytes[3]];
    let order = ByteOrder::detect(magic).ok_or(DecodeError::BadMagicWord {
        found: u32::from_be_bytes(magic),
    })?;

    if length < HEADER_SIZE as u64 {
        return Err(DecodeError::Truncated { length });
    }
    reader.read_exact(&mut header_bytes[4..])?;
    let header = FieldMapHeader::from_bytes(&header_bytes, order);
    debug_assert_eq!(header.magic, MAGIC_WORD);

    let (n1, n2, n3) = header.counts();
    let num_values = header
        .num_values()
        .ok_or_else(|| DecodeError::invalid("nq1", "grid dimensions overflow"))?;
    let expected = expected_file_size(num_values)
        .ok_or_else(|| DecodeError::invalid("nq1", "grid dimensions overflow"))?;
    log::debug!(
        "decode: byte_order={:?} counts=({},{},{}) expected_size={} actual_size={}",
        order,
        n1,
        n2,
        n3,
        expected,
        length
    );
    if expected != length {
        return Err(DecodeError::SizeMismatch {
            expected,
            actual: length,
        });
    }

    let units = validate_header(&header)?;
    log::debug!(
        "decode: grid_cs={:?} field_cs={:?} length={:?} angle={:?} field={:?}",
        units.grid_cs,
        units.field_cs,
        units.length,
        units.angle,
        units.field
    );

    let mut raw = vec![0u8; num_values * SAMPLE_SIZE];
    reader.read_exact(&mut raw)?;
    let samples = decode_samples(&raw, order);

    Ok(DecodedMap {
        header,
        units,
        byte_order: order,
        samples,
    })
}

/// Check tags and axis declarations.
///
/// # Errors
/// `InvalidHeader` naming the first unusable field.
pub fn validate_header(header: &FieldMapHeader) -> Result<MapUnits> {
    let units = MapUnits::from_header(header)?;

    for (axis, (min_name, max_name, count_name)) in header.axes.iter().zip(AXIS_NAMES) {
        if axis.count == 0 {
            return Err(DecodeError::invalid(count_name, "axis has no points"));
        }
        if !axis.min.is_finite() {
            return Err(DecodeError::invalid(min_name, format!("not finite: {}", axis.min)));
        }
        if !axis.max.is_finite() {
            return Err(DecodeError::invalid(max_name, format!("not finite: {}", axis.max)));
        }
        if axis.max < axis.min || (axis.count > 1 && axis.max == axis.min) {
            return Err(DecodeError::invalid(
                max_name,
                format!(
                    "bounds [{}, {}] cannot hold {} points",
                    axis.min, axis.max, axis.count
                ),
            ));
        }
    }

    Ok(units)
}

fn decode_samples(raw: &[u8], order: ByteOrder) -> Vec<FieldVector> {
    raw.chunks_exact(SAMPLE_SIZE)
        .map(|record| {
            let word = |i: usize| [record[i], record[i + 1], record[i + 2], record[i + 3]];
            FieldVector::new(
                order.read_f32(word(0)),
                order.read_f32(word(4)),
                order.read_f32(word(8)),
            )
        })
        .collect()
}

/// Encode a header and its samples into a file image.
///
/// # Errors
/// `InvalidHeader` if the sample count disagrees with the header's axes.
pub fn encode(
    header: &FieldMapHeader,
    samples: &[FieldVector],
    order: ByteOrder,
) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE + samples.len() * SAMPLE_SIZE);
    write_map(&mut bytes, header, samples, order)?;
    Ok(bytes)
}

/// Write a header and its samples to `writer` in the given byte order.
///
/// # Errors
/// * `InvalidHeader` if the sample count disagrees with the header's axes
/// * `Io` if the writer fails
pub fn write_map<W: Write>(
    writer: &mut W,
    header: &FieldMapHeader,
    samples: &[FieldVector],
    order: ByteOrder,
) -> Result<()> {
    if header.num_values() != Some(samples.len()) {
        let (n1, n2, n3) = header.counts();
        return Err(DecodeError::invalid(
            "nq1",
            format!(
                "axes declare {}x{}x{} samples, {} given",
                n1,
                n2,
                n3,
                samples.len()
            ),
        ));
    }

    writer.write_all(&header.to_bytes(order))?;
    for sample in samples {
        for component in sample.as_array() {
            writer.write_all(&order.write_f32(component))?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write a field map to a file path.
pub fn save_to_file<P: AsRef<Path>>(
    path: P,
    header: &FieldMapHeader,
    samples: &[FieldVector],
    order: ByteOrder,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_map(&mut writer, header, samples, order)
}
