//! Coordinate-system and unit tags of the header.
//!
//! Loaded maps are normalised to centimetres, degrees and kilogauss.

use crate::error::{DecodeError, Result};
use crate::format::FieldMapHeader;

/// Coordinate system of the grid or of the stored field components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordinateSystem {
    /// (φ, ρ, z); field components stored as (Bφ, Bρ, Bz).
    #[default]
    Cylindrical,
    /// (x, y, z); field components stored as (Bx, By, Bz).
    Cartesian,
}

impl CoordinateSystem {
    /// Interpret a header tag.
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(CoordinateSystem::Cylindrical),
            1 => Some(CoordinateSystem::Cartesian),
            _ => None,
        }
    }

    /// Header tag.
    pub fn tag(self) -> u32 {
        self as u32
    }
}

/// Unit of lengths in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    /// Centimetres.
    #[default]
    Centimeter,
    /// Metres.
    Meter,
}

impl LengthUnit {
    /// Interpret a header tag.
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(LengthUnit::Centimeter),
            1 => Some(LengthUnit::Meter),
            _ => None,
        }
    }

    /// Header tag.
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Factor converting a length in this unit to centimetres.
    pub fn to_cm(self) -> f64 {
        match self {
            LengthUnit::Centimeter => 1.0,
            LengthUnit::Meter => 100.0,
        }
    }
}

/// Unit of angles in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleUnit {
    /// Degrees.
    #[default]
    Degree,
    /// Radians.
    Radian,
}

impl AngleUnit {
    /// Interpret a header tag.
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(AngleUnit::Degree),
            1 => Some(AngleUnit::Radian),
            _ => None,
        }
    }

    /// Header tag.
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Factor converting an angle in this unit to degrees.
    pub fn to_degrees(self) -> f64 {
        match self {
            AngleUnit::Degree => 1.0,
            AngleUnit::Radian => 180.0 / std::f64::consts::PI,
        }
    }
}

/// Unit of the stored field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldUnit {
    /// Kilogauss.
    #[default]
    Kilogauss,
    /// Gauss.
    Gauss,
    /// Tesla.
    Tesla,
}

impl FieldUnit {
    /// Interpret a header tag.
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(FieldUnit::Kilogauss),
            1 => Some(FieldUnit::Gauss),
            2 => Some(FieldUnit::Tesla),
            _ => None,
        }
    }

    /// Header tag.
    pub fn tag(self) -> u32 {
        self as u32
    }

    /// Factor converting a field in this unit to kilogauss.
    pub fn to_kilogauss(self) -> f32 {
        match self {
            FieldUnit::Kilogauss => 1.0,
            FieldUnit::Gauss => 0.001,
            FieldUnit::Tesla => 10.0,
        }
    }
}

/// All tags of a header, interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapUnits {
    /// Coordinate system of the grid axes.
    pub grid_cs: CoordinateSystem,
    /// Coordinate system of the stored field components.
    pub field_cs: CoordinateSystem,
    /// Length unit.
    pub length: LengthUnit,
    /// Angle unit.
    pub angle: AngleUnit,
    /// Field unit.
    pub field: FieldUnit,
}

impl MapUnits {
    /// Interpret the tags of `header`.
    ///
    /// # Errors
    /// `InvalidHeader` naming the first unknown tag.
    pub fn from_header(header: &FieldMapHeader) -> Result<Self> {
        fn tag<T>(field: &'static str, value: u32, parse: fn(u32) -> Option<T>) -> Result<T> {
            parse(value)
                .ok_or_else(|| DecodeError::invalid(field, format!("unknown tag {}", value)))
        }

        Ok(Self {
            grid_cs: tag("gridCS", header.grid_cs, CoordinateSystem::from_tag)?,
            field_cs: tag("fieldCS", header.field_cs, CoordinateSystem::from_tag)?,
            length: tag("lengthUnits", header.length_units, LengthUnit::from_tag)?,
            angle: tag("angleUnits", header.angle_units, AngleUnit::from_tag)?,
            field: tag("fieldUnits", header.field_units, FieldUnit::from_tag)?,
        })
    }

    /// Write these tags into `header`.
    pub fn apply_to(&self, header: &mut FieldMapHeader) {
        header.grid_cs = self.grid_cs.tag();
        header.field_cs = self.field_cs.tag();
        header.length_units = self.length.tag();
        header.angle_units = self.angle.tag();
        header.field_units = self.field.tag();
    }

    /// True if no conversion is needed at load.
    pub fn is_canonical(&self) -> bool {
        self.length == LengthUnit::Centimeter
            && self.angle == AngleUnit::Degree
            && self.field == FieldUnit::Kilogauss
    }
}
