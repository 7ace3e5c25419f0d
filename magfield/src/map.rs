//! FieldMap implementation.
//!
//! A loaded, validated and unit-normalised field map. The map is immutable
//! while it is queried; the per-query cell cache lives in a
//! [`FieldProbe`](crate::FieldProbe), so one map can be shared by any number
//! of threads.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use magfield_core::{
    cylindrical_to_cartesian, to_cylindrical, CompositeIndex, Cylindrical, FieldVector, GridAxis,
    Interpolation, Point3, SectorSymmetry,
};
use magfield_io::{
    compute_metrics, AxisSpec, ByteOrder, CoordinateSystem, DecodedMap, FieldMapHeader,
    FieldMetrics, MapConfig, MapUnits,
};

use crate::error::{MagError, Result};
use crate::probe::FieldProbe;

/// Tolerance in degrees when deciding whether the φ axis covers the full circle.
const FULL_CIRCLE_TOLERANCE: f64 = 1e-3;

/// Magnet geometry of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Axisymmetric: a single φ plane, looked up in (ρ, z) with a 2-D cell.
    Solenoid,
    /// Sectored: a φ range, looked up in (φ, ρ, z) with a 3-D cell.
    Toroid,
}

/// A precomputed magnetic field map, ready to be queried.
///
/// Lengths are in cm, angles in degrees and fields in kG regardless of the
/// units of the file it was loaded from.
///
/// # Example
///
/// ```no_run
/// use magfield::{FieldMap, Point3};
///
/// let map = FieldMap::load_from_file("toroid_wedge.dat")?;
///
/// // Uncached one-off query
/// let b = map.field_at(Point3::new(250.0, 0.0, 300.0));
///
/// // Cached queries along a track
/// let mut probe = map.probe();
/// for step in 0..100 {
///     let b = probe.field(Point3::new(250.0, 0.1 * step as f64, 300.0));
/// }
/// # Ok::<(), magfield::MagError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FieldMap {
    /// φ, ρ, z.
    axes: [GridAxis; 3],
    shape: CompositeIndex,
    samples: Vec<FieldVector>,
    topology: Topology,
    symmetry: Option<SectorSymmetry>,
    field_cs: CoordinateSystem,
    config: MapConfig,
    metrics: FieldMetrics,
    created_millis: i64,
    byte_order: ByteOrder,
    source: Option<PathBuf>,
}

impl FieldMap {
    /// Load a field map file.
    ///
    /// # Errors
    /// * `Decode` if the file cannot be read or fails format validation
    /// * `UnsupportedLayout` if the grid is not a cylindrical solenoid or toroid
    /// * `Core` if a toroid wedge does not tile the circle
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let decoded = magfield_io::load(path)?;
        Self::from_decoded(decoded, Some(path.to_path_buf()))
    }

    /// Decode a field map from a complete file image.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = magfield_io::decode(bytes)?;
        Self::from_decoded(decoded, None)
    }

    /// Build a map from decoded file contents.
    ///
    /// Converts to cm, degrees and kG, classifies the topology, checks the
    /// wedge geometry of symmetric toroids and computes the metrics.
    pub fn from_decoded(decoded: DecodedMap, source: Option<PathBuf>) -> Result<Self> {
        let DecodedMap {
            header,
            units,
            byte_order,
            mut samples,
        } = decoded;

        if units.grid_cs != CoordinateSystem::Cylindrical {
            return Err(MagError::unsupported(
                "grid coordinate system must be cylindrical (phi, rho, z)",
            ));
        }

        let axes = normalized_axes(&header, &units)?;
        for axis in &axes[1..] {
            if axis.is_degenerate() {
                return Err(MagError::unsupported(format!(
                    "{} axis needs at least 2 points",
                    axis.name()
                )));
            }
        }

        let field_factor = units.field.to_kilogauss();
        if field_factor != 1.0 {
            for sample in &mut samples {
                *sample = sample.scaled(field_factor);
            }
        }

        let shape = CompositeIndex::new(axes[0].count(), axes[1].count(), axes[2].count());
        if shape.len() != samples.len() {
            return Err(MagError::unsupported(format!(
                "{} samples for a {}x{}x{} grid",
                samples.len(),
                axes[0].count(),
                axes[1].count(),
                axes[2].count()
            )));
        }

        let (topology, symmetry) = classify(&axes[0])?;
        let metrics = compute_metrics(&samples);

        let map = Self {
            axes,
            shape,
            samples,
            topology,
            symmetry,
            field_cs: units.field_cs,
            config: MapConfig::default(),
            metrics,
            created_millis: header.creation_millis(),
            byte_order,
            source,
        };
        map.log_summary();
        Ok(map)
    }

    fn log_summary(&self) {
        let [phi, rho, z] = &self.axes;
        let source = self
            .source
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        let symmetry = match &self.symmetry {
            Some(sym) => format!("{}-fold", sym.sectors()),
            None if self.topology == Topology::Solenoid => "axisymmetric".to_string(),
            None => "none".to_string(),
        };
        let peak = self
            .grid_location(self.metrics.max_index)
            .unwrap_or_default();

        log::info!(
            "field map source={} topology={:?} symmetry={} field_cs={:?} byte_order={:?} \
             phi=[{}, {}]x{} rho=[{}, {}]x{} z=[{}, {}]x{} \
             max_field={:.4}kG at (phi={}, rho={}, z={}) avg_field={:.4}kG",
            source,
            self.topology,
            symmetry,
            self.field_cs,
            self.byte_order,
            phi.min(),
            phi.max(),
            phi.count(),
            rho.min(),
            rho.max(),
            rho.count(),
            z.min(),
            z.max(),
            z.count(),
            self.metrics.max_magnitude,
            peak.phi,
            peak.rho,
            peak.z,
            self.metrics.avg_magnitude,
        );
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the query configuration.
    pub fn with_config(mut self, config: MapConfig) -> Self {
        self.config = config;
        self
    }

    /// Query configuration.
    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Replace the query configuration.
    pub fn set_config(&mut self, config: MapConfig) {
        self.config = config;
    }

    /// Set the field scale factor.
    pub fn set_scale(&mut self, scale: f32) {
        self.config.scale = scale;
    }

    /// Set the position of the map origin in cm.
    pub fn set_shift(&mut self, shift: [f32; 3]) {
        self.config.shift = shift;
    }

    /// Set the interpolation mode.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.config.interpolation = interpolation;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Magnet geometry.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// True if the map stores less than the full field and relies on symmetry
    /// (every solenoid, and toroids stored as a wedge).
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.topology == Topology::Solenoid || self.symmetry.is_some()
    }

    /// Sector symmetry of a wedge toroid.
    #[inline]
    pub fn symmetry(&self) -> Option<&SectorSymmetry> {
        self.symmetry.as_ref()
    }

    /// Axes ordered φ, ρ, z.
    #[inline]
    pub fn axes(&self) -> &[GridAxis; 3] {
        &self.axes
    }

    /// Azimuthal axis (degrees).
    #[inline]
    pub fn phi_axis(&self) -> &GridAxis {
        &self.axes[0]
    }

    /// Radial axis (cm).
    #[inline]
    pub fn rho_axis(&self) -> &GridAxis {
        &self.axes[1]
    }

    /// Longitudinal axis (cm).
    #[inline]
    pub fn z_axis(&self) -> &GridAxis {
        &self.axes[2]
    }

    /// Composite index of the sample array.
    #[inline]
    pub fn shape(&self) -> CompositeIndex {
        self.shape
    }

    /// All samples in composite-index order, in kG, native components.
    #[inline]
    pub fn samples(&self) -> &[FieldVector] {
        &self.samples
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed map.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Coordinate system of the stored field components.
    #[inline]
    pub fn field_cs(&self) -> CoordinateSystem {
        self.field_cs
    }

    /// Load-time magnitude statistics.
    #[inline]
    pub fn metrics(&self) -> &FieldMetrics {
        &self.metrics
    }

    /// Byte order of the file the map was decoded from.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Path the map was loaded from, if any.
    #[inline]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Creation time as stored, in ms since the Unix epoch.
    #[inline]
    pub fn creation_millis(&self) -> i64 {
        self.created_millis
    }

    /// Creation time, if representable.
    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_millis)
    }

    /// Stored sample at a flat index.
    #[inline]
    pub fn sample_at(&self, flat: usize) -> Option<FieldVector> {
        self.samples.get(flat).copied()
    }

    /// Grid coordinates `(φ, ρ, z)` of a flat index.
    pub fn grid_location(&self, flat: usize) -> Option<Cylindrical> {
        let (i, j, k) = self.shape.unpack(flat)?;
        Some(Cylindrical {
            phi: self.axes[0].value_at(i),
            rho: self.axes[1].value_at(j),
            z: self.axes[2].value_at(k),
        })
    }

    /// True if `(ρ, z)` lies inside the stored radial and longitudinal ranges.
    #[inline]
    pub fn contains_cylindrical(&self, rho: f64, z: f64) -> bool {
        self.axes[1].contains(rho) && self.axes[2].contains(z)
    }

    /// True if a query point (before the shift is applied) falls inside the
    /// map's radial and longitudinal ranges.
    pub fn contains_cartesian(&self, point: Point3) -> bool {
        let c = to_cylindrical(self.to_map_frame(point));
        self.contains_cylindrical(c.rho, c.z)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// A cached query handle for one worker.
    #[inline]
    pub fn probe(&self) -> FieldProbe<'_> {
        FieldProbe::new(self)
    }

    /// Cartesian field `(Bx, By, Bz)` in kG at `point` (cm).
    ///
    /// Uses a fresh cell on every call; prefer [`probe`](Self::probe) in loops.
    pub fn field_at(&self, point: Point3) -> FieldVector {
        self.probe().field(point)
    }

    /// Subtract the configured shift.
    #[inline]
    pub(crate) fn to_map_frame(&self, point: Point3) -> Point3 {
        let [dx, dy, dz] = self.config.shift;
        Point3::new(point.x - dx as f64, point.y - dy as f64, point.z - dz as f64)
    }

    /// Azimuth to look up in a full (non-folded) toroid map, wrapped into
    /// `[min, min + 360)`.
    #[inline]
    pub(crate) fn wrap_phi(&self, phi: f64) -> f64 {
        let min = self.axes[0].min();
        let turn = (phi - min).rem_euclid(360.0);
        // rem_euclid rounds tiny negative offsets up to a full turn
        if turn >= 360.0 {
            min
        } else {
            min + turn
        }
    }

    /// Bounds `[max, min + 360)` of the cell joining the last stored φ plane
    /// to the first one, for a full toroid whose φ axis stops short of 360°.
    #[inline]
    pub(crate) fn phi_seam(&self) -> Option<(f64, f64)> {
        if self.topology != Topology::Toroid || self.symmetry.is_some() {
            return None;
        }
        let axis = &self.axes[0];
        let end = axis.min() + 360.0;
        (axis.max() < end).then_some((axis.max(), end))
    }

    /// Convert a stored sample looked up at `phi` degrees to Cartesian
    /// components in the frame of the stored grid.
    #[inline]
    pub(crate) fn native_to_cartesian(&self, native: FieldVector, phi: f64) -> FieldVector {
        match self.field_cs {
            CoordinateSystem::Cylindrical => {
                cylindrical_to_cartesian(native.b2, native.b1, native.b3, phi)
            }
            CoordinateSystem::Cartesian => native,
        }
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Header describing this map in canonical units (cm, degrees, kG).
    pub fn to_header(&self) -> FieldMapHeader {
        let spec = |axis: &GridAxis| {
            AxisSpec::new(axis.min() as f32, axis.max() as f32, axis.count() as u32)
        };
        let [phi, rho, z] = &self.axes;
        let mut header = FieldMapHeader::new([spec(phi), spec(rho), spec(z)]);
        MapUnits {
            field_cs: self.field_cs,
            ..MapUnits::default()
        }
        .apply_to(&mut header);
        header.set_creation_millis(self.created_millis);
        header
    }

    /// Write the map in canonical units.
    pub fn save<W: Write>(&self, writer: &mut W, order: ByteOrder) -> Result<()> {
        magfield_io::write_map(writer, &self.to_header(), &self.samples, order)?;
        Ok(())
    }

    /// Write the map to a file path in canonical units.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, order: ByteOrder) -> Result<()> {
        magfield_io::save_to_file(path, &self.to_header(), &self.samples, order)?;
        Ok(())
    }
}

/// Build the three axes in cm and degrees.
fn normalized_axes(header: &FieldMapHeader, units: &MapUnits) -> Result<[GridAxis; 3]> {
    let angle = units.angle.to_degrees();
    let length = units.length.to_cm();
    let axis = |name: &'static str, spec: &AxisSpec, factor: f64| {
        GridAxis::new(
            name,
            spec.min as f64 * factor,
            spec.max as f64 * factor,
            spec.count as usize,
        )
    };

    Ok([
        axis("phi", &header.axes[0], angle)?,
        axis("rho", &header.axes[1], length)?,
        axis("z", &header.axes[2], length)?,
    ])
}

/// Topology from the φ axis, with the wedge symmetry of a partial toroid.
fn classify(phi: &GridAxis) -> Result<(Topology, Option<SectorSymmetry>)> {
    if phi.is_degenerate() {
        return Ok((Topology::Solenoid, None));
    }
    if phi.span() + phi.delta() >= 360.0 - FULL_CIRCLE_TOLERANCE {
        return Ok((Topology::Toroid, None));
    }
    let symmetry = SectorSymmetry::from_wedge(phi.min(), phi.max())?;
    Ok((Topology::Toroid, Some(symmetry)))
}
