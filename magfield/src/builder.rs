//! FieldMapBuilder for constructing field maps in memory.
//!
//! Maps built here go through the same validation as maps loaded from a file.

use magfield_core::{Cylindrical, FieldVector, GridAxis};
use magfield_io::{
    validate_header, AxisSpec, ByteOrder, CoordinateSystem, DecodedMap, FieldMapHeader, MapConfig,
    MapUnits,
};

use crate::error::Result;
use crate::map::FieldMap;

/// Bounds and point count of one axis: `(min, max, count)`.
pub type AxisRange = (f32, f32, u32);

/// Builder for constructing `FieldMap` instances in canonical units
/// (cm, degrees, kG).
///
/// # Example
///
/// ```
/// use magfield::{FieldMapBuilder, FieldVector, Point3};
///
/// // Uniform 20 kG solenoid field along z
/// let map = FieldMapBuilder::solenoid((0.0, 100.0, 51), (-200.0, 200.0, 201))
///     .fill_fn(|_| FieldVector::new(0.0, 0.0, 20.0))
///     .build()?;
///
/// assert_eq!(map.field_at(Point3::new(10.0, 10.0, 0.0)), FieldVector::new(0.0, 0.0, 20.0));
/// # Ok::<(), magfield::MagError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FieldMapBuilder {
    axes: [AxisSpec; 3],
    field_cs: CoordinateSystem,
    samples: Option<Vec<FieldVector>>,
    config: MapConfig,
    created_millis: Option<i64>,
}

impl FieldMapBuilder {
    /// Start an axisymmetric map over `(ρ, z)`.
    pub fn solenoid(rho: AxisRange, z: AxisRange) -> Self {
        Self::toroid((0.0, 0.0, 1), rho, z)
    }

    /// Start a sectored map over `(φ, ρ, z)`.
    ///
    /// A φ range short of the full circle is a wedge and must start at 0.
    pub fn toroid(phi: AxisRange, rho: AxisRange, z: AxisRange) -> Self {
        let spec = |(min, max, count): AxisRange| AxisSpec::new(min, max, count);
        Self {
            axes: [spec(phi), spec(rho), spec(z)],
            field_cs: CoordinateSystem::Cylindrical,
            samples: None,
            config: MapConfig::default(),
            created_millis: None,
        }
    }

    /// Coordinate system of the samples passed to `fill_fn`/`with_samples`.
    ///
    /// Cylindrical samples are `(Bφ, Bρ, Bz)`; Cartesian samples are
    /// `(Bx, By, Bz)` in the frame of the stored grid.
    pub fn with_field_cs(mut self, field_cs: CoordinateSystem) -> Self {
        self.field_cs = field_cs;
        self
    }

    /// Query configuration of the built map.
    pub fn with_config(mut self, config: MapConfig) -> Self {
        self.config = config;
        self
    }

    /// Creation time in ms since the Unix epoch (defaults to now).
    pub fn with_creation_millis(mut self, millis: i64) -> Self {
        self.created_millis = Some(millis);
        self
    }

    /// Use explicit samples in composite-index order.
    pub fn with_samples(mut self, samples: Vec<FieldVector>) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Fill every grid point from a function of its `(φ, ρ, z)` location.
    ///
    /// If an axis is invalid the samples are left unset and `build` reports
    /// the axis error.
    pub fn fill_fn<F>(mut self, field_fn: F) -> Self
    where
        F: Fn(Cylindrical) -> FieldVector,
    {
        let axis = |name: &'static str, spec: &AxisSpec| {
            GridAxis::new(name, spec.min as f64, spec.max as f64, spec.count as usize)
        };
        let (Ok(phi), Ok(rho), Ok(z)) = (
            axis("phi", &self.axes[0]),
            axis("rho", &self.axes[1]),
            axis("z", &self.axes[2]),
        ) else {
            self.samples = None;
            return self;
        };

        let mut samples = Vec::with_capacity(phi.count() * rho.count() * z.count());
        for p in phi.values() {
            for r in rho.values() {
                for h in z.values() {
                    samples.push(field_fn(Cylindrical { phi: p, rho: r, z: h }));
                }
            }
        }
        self.samples = Some(samples);
        self
    }

    /// Validate and build the map. Unset samples are zero.
    pub fn build(self) -> Result<FieldMap> {
        let mut header = FieldMapHeader::new(self.axes);
        MapUnits {
            field_cs: self.field_cs,
            ..MapUnits::default()
        }
        .apply_to(&mut header);
        if let Some(millis) = self.created_millis {
            header.set_creation_millis(millis);
        }

        let units = validate_header(&header)?;
        let samples = match self.samples {
            Some(samples) => samples,
            None => vec![FieldVector::ZERO; header.num_values().unwrap_or(0)],
        };

        let decoded = DecodedMap {
            header,
            units,
            byte_order: ByteOrder::Big,
            samples,
        };
        Ok(FieldMap::from_decoded(decoded, None)?.with_config(self.config))
    }
}
