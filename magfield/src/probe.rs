//! Per-worker cached query handle.

use magfield_core::{cylindrical_to_cartesian, to_cylindrical, FieldVector, Point3};
use magfield_io::CoordinateSystem;

use crate::cell::InterpolationCell;
use crate::map::{FieldMap, Topology};

/// A query handle owning the interpolation cell cache for one map.
///
/// Create one per worker thread; the map itself is shared read-only.
///
/// # Example
///
/// ```
/// use magfield::{FieldMapBuilder, FieldVector, Point3};
///
/// let map = FieldMapBuilder::solenoid((0.0, 100.0, 51), (-200.0, 200.0, 201))
///     .fill_fn(|_| FieldVector::new(0.0, 0.0, 20.0))
///     .build()?;
///
/// let mut probe = map.probe();
/// for step in 0..10 {
///     let b = probe.field(Point3::new(10.0, 0.0, 0.01 * step as f64));
///     assert_eq!(b.b3, 20.0);
/// }
/// assert_eq!(probe.refreshes(), 1);
/// # Ok::<(), magfield::MagError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FieldProbe<'a> {
    map: &'a FieldMap,
    cell: InterpolationCell,
    refreshes: u64,
}

impl<'a> FieldProbe<'a> {
    /// Create a probe with an empty cell.
    pub fn new(map: &'a FieldMap) -> Self {
        Self {
            map,
            cell: InterpolationCell::new(map.topology()),
            refreshes: 0,
        }
    }

    /// The map this probe queries.
    #[inline]
    pub fn map(&self) -> &'a FieldMap {
        self.map
    }

    /// The cached cell.
    #[inline]
    pub fn cell(&self) -> &InterpolationCell {
        &self.cell
    }

    /// Number of cache misses so far.
    #[inline]
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Cartesian field `(Bx, By, Bz)` in kG at `point` (cm).
    ///
    /// Points whose radius or height fall outside the stored grid read as
    /// zero.
    pub fn field(&mut self, point: Point3) -> FieldVector {
        let map = self.map;
        let c = to_cylindrical(map.to_map_frame(point));
        if !map.contains_cylindrical(c.rho, c.z) {
            return FieldVector::ZERO;
        }

        let b = match (map.topology(), map.symmetry()) {
            (Topology::Solenoid, _) => {
                let native = self.lookup([0.0, c.rho, c.z]);
                let (b_rho, b_phi, b_z) = match map.field_cs() {
                    CoordinateSystem::Cylindrical => (native.b2, native.b1, native.b3),
                    CoordinateSystem::Cartesian => (native.b1, native.b2, native.b3),
                };
                cylindrical_to_cartesian(b_rho, b_phi, b_z, c.phi)
            }
            (Topology::Toroid, Some(symmetry)) => {
                let fold = symmetry.fold(c.phi);
                // the snapped wedge [0, W] can overhang the stored f32 edges
                let axis = map.phi_axis();
                let phi = fold.local_phi.clamp(axis.min(), axis.max());
                let native = self.lookup([phi, c.rho, c.z]);
                let local = map.native_to_cartesian(native, phi);
                symmetry.unfold(&fold, local)
            }
            (Topology::Toroid, None) => {
                let phi = map.wrap_phi(c.phi);
                let native = self.lookup([phi, c.rho, c.z]);
                map.native_to_cartesian(native, phi)
            }
        };

        b.scaled(map.config().scale)
    }

    /// Stored-component sample at native coordinates `[φ, ρ, z]`.
    #[inline]
    fn lookup(&mut self, q: [f64; 3]) -> FieldVector {
        if !self.cell.contains(q) {
            self.refreshes += 1;
            if !self.cell.refresh(self.map, q) {
                return FieldVector::ZERO;
            }
        }
        self.cell.sample(q, self.map.config().interpolation)
    }

    /// Query a sequence of points into `out`, pairwise.
    pub fn field_into(&mut self, points: &[Point3], out: &mut [FieldVector]) {
        for (point, b) in points.iter().zip(out.iter_mut()) {
            *b = self.field(*point);
        }
    }
}
