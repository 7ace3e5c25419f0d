//! Field map file header definition.

use chrono::{DateTime, Utc};

/// Magic word identifying a field map file.
pub const MAGIC_WORD: u32 = 0xCED;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Bytes per stored sample (three `f32` components).
pub const SAMPLE_SIZE: usize = 12;

/// Byte order of the 4-byte words in a file.
///
/// Files are written big-endian; maps produced on little-endian hosts without
/// swapping are accepted too. The order is detected from the magic word and
/// applies to every header field and every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Most significant byte first (the canonical on-disk order).
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

impl ByteOrder {
    /// Detect the order from the first four bytes of a file.
    ///
    /// Big-endian is tried first. Returns `None` if neither order yields
    /// [`MAGIC_WORD`].
    pub fn detect(word: [u8; 4]) -> Option<Self> {
        if u32::from_be_bytes(word) == MAGIC_WORD {
            Some(ByteOrder::Big)
        } else if u32::from_le_bytes(word) == MAGIC_WORD {
            Some(ByteOrder::Little)
        } else {
            None
        }
    }

    /// The order of the running host.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Decode a `u32`.
    #[inline]
    pub fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        }
    }

    /// Decode an `i32`.
    #[inline]
    pub fn read_i32(self, bytes: [u8; 4]) -> i32 {
        self.read_u32(bytes) as i32
    }

    /// Decode an `f32`.
    #[inline]
    pub fn read_f32(self, bytes: [u8; 4]) -> f32 {
        f32::from_bits(self.read_u32(bytes))
    }

    /// Encode a `u32`.
    #[inline]
    pub fn write_u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        }
    }

    /// Encode an `f32`.
    #[inline]
    pub fn write_f32(self, value: f32) -> [u8; 4] {
        self.write_u32(value.to_bits())
    }
}

/// Bounds and point count of one stored axis, as declared in the header.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisSpec {
    /// Smallest value.
    pub min: f32,
    /// Largest value.
    pub max: f32,
    /// Number of points, ends included.
    pub count: u32,
}

impl AxisSpec {
    /// Create an axis specification.
    pub const fn new(min: f32, max: f32, count: u32) -> Self {
        Self { min, max, count }
    }
}

/// Field map file header.
///
/// Layout (80 bytes, twenty 4-byte words in the file's byte order):
/// - Word 0: magic word `0xCED`
/// - Words 1-2: grid and field coordinate-system tags
/// - Words 3-5: length, angle and field unit tags
/// - Words 6-8: φ axis min (f32), max (f32), count (u32)
/// - Words 9-11: ρ axis
/// - Words 12-14: z axis
/// - Words 15-16: creation time in ms since the epoch, high and low halves (i32)
/// - Words 17-19: reserved
///
/// Tags are kept raw here; [`crate::units`] interprets them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMapHeader {
    /// Magic word.
    pub magic: u32,
    /// Coordinate system of the grid axes.
    pub grid_cs: u32,
    /// Coordinate system of the stored field components.
    pub field_cs: u32,
    /// Unit of lengths (ρ, z bounds).
    pub length_units: u32,
    /// Unit of angles (φ bounds).
    pub angle_units: u32,
    /// Unit of the stored field values.
    pub field_units: u32,
    /// Axes ordered slow→fast: φ, ρ, z.
    pub axes: [AxisSpec; 3],
    /// High half of the creation timestamp.
    pub created_high: i32,
    /// Low half of the creation timestamp.
    pub created_low: i32,
    /// Reserved words.
    pub reserved: [u32; 3],
}

impl FieldMapHeader {
    /// Create a header for a cylindrical grid in canonical units
    /// (cm, degrees, kG), stamped with the current time.
    pub fn new(axes: [AxisSpec; 3]) -> Self {
        let mut header = Self {
            magic: MAGIC_WORD,
            grid_cs: 0,
            field_cs: 0,
            length_units: 0,
            angle_units: 0,
            field_units: 0,
            axes,
            created_high: 0,
            created_low: 0,
            reserved: [0; 3],
        };
        header.set_creation_millis(Utc::now().timestamp_millis());
        header
    }

    /// Validate the magic word.
    pub fn is_valid(&self) -> bool {
        self.magic == MAGIC_WORD
    }

    /// Per-axis counts `(N1, N2, N3)`.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.axes[0].count as usize,
            self.axes[1].count as usize,
            self.axes[2].count as usize,
        )
    }

    /// `N1 * N2 * N3`, or `None` on overflow.
    pub fn num_values(&self) -> Option<usize> {
        let (n1, n2, n3) = self.counts();
        n1.checked_mul(n2)?.checked_mul(n3)
    }

    /// Creation time as milliseconds since the Unix epoch.
    pub fn creation_millis(&self) -> i64 {
        ((self.created_high as i64) << 32) | (self.created_low as u32 as i64)
    }

    /// Split a millisecond timestamp into the two stored halves.
    pub fn set_creation_millis(&mut self, millis: i64) {
        self.created_high = (millis >> 32) as i32;
        self.created_low = millis as i32;
    }

    /// Creation time, if the stored value is representable.
    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.creation_millis())
    }

    /// Serialize the header in the given byte order.
    pub fn to_bytes(&self, order: ByteOrder) -> [u8; HEADER_SIZE] {
        let mut words = [[0u8; 4]; HEADER_SIZE / 4];

        words[0] = order.write_u32(self.magic);
        words[1] = order.write_u32(self.grid_cs);
        words[2] = order.write_u32(self.field_cs);
        words[3] = order.write_u32(self.length_units);
        words[4] = order.write_u32(self.angle_units);
        words[5] = order.write_u32(self.field_units);
        for (i, axis) in self.axes.iter().enumerate() {
            words[6 + 3 * i] = order.write_f32(axis.min);
            words[7 + 3 * i] = order.write_f32(axis.max);
            words[8 + 3 * i] = order.write_u32(axis.count);
        }
        words[15] = order.write_u32(self.created_high as u32);
        words[16] = order.write_u32(self.created_low as u32);
        for (i, r) in self.reserved.iter().enumerate() {
            words[17 + i] = order.write_u32(*r);
        }

        let mut bytes = [0u8; HEADER_SIZE];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words.iter()) {
            chunk.copy_from_slice(word);
        }
        bytes
    }

    /// Deserialize a header in the given byte order.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE], order: ByteOrder) -> Self {
        let word = |i: usize| -> [u8; 4] {
            let at = 4 * i;
            [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]
        };
        let axis = |first: usize| AxisSpec {
            min: order.read_f32(word(first)),
            max: order.read_f32(word(first + 1)),
            count: order.read_u32(word(first + 2)),
        };

        Self {
            magic: order.read_u32(word(0)),
            grid_cs: order.read_u32(word(1)),
            field_cs: order.read_u32(word(2)),
            length_units: order.read_u32(word(3)),
            angle_units: order.read_u32(word(4)),
            field_units: order.read_u32(word(5)),
            axes: [axis(6), axis(9), axis(12)],
            created_high: order.read_i32(word(15)),
            created_low: order.read_i32(word(16)),
            reserved: [
                order.read_u32(word(17)),
                order.read_u32(word(18)),
                order.read_u32(word(19)),
            ],
        }
    }
}

/// Expected file size for a grid of `num_values` samples, or `None` on
/// overflow.
pub fn expected_file_size(num_values: usize) -> Option<u64> {
    (num_values as u64)
        .checked_mul(SAMPLE_SIZE as u64)?
        .checked_add(HEADER_SIZE as u64)
}
