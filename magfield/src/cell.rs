//! Containment-cached interpolation cell.
//!
//! Holds the corner samples of the grid cell around the last queried point.
//! Trajectories move smoothly, so most queries land in the same cell as the
//! previous one and only pay for a bounds check.

use magfield_core::{
    bilinear_weights, blend, corner_from_index_2d, corner_from_index_3d, nearest_corner_2d,
    nearest_corner_3d, trilinear_weights, FieldVector, Interpolation,
};

use crate::map::{FieldMap, Topology};

/// The cell of a 2-D (ρ, z) or 3-D (φ, ρ, z) grid around a query point.
///
/// Coordinates passed in are native `[φ, ρ, z]`; a 2-D cell ignores φ.
#[derive(Debug, Clone)]
pub struct InterpolationCell {
    /// First active axis: 0 for a 3-D cell, 1 for a 2-D cell.
    first_axis: usize,
    lo: [f64; 3],
    hi: [f64; 3],
    norm: [f64; 3],
    /// `2^d` corner samples, see `magfield_core::interpolation` for the order.
    corners: [FieldVector; 8],
    valid: bool,
}

impl InterpolationCell {
    /// An empty cell matching the map's topology.
    pub fn new(topology: Topology) -> Self {
        Self {
            first_axis: match topology {
                Topology::Solenoid => 1,
                Topology::Toroid => 0,
            },
            lo: [0.0; 3],
            hi: [0.0; 3],
            norm: [0.0; 3],
            corners: [FieldVector::ZERO; 8],
            valid: false,
        }
    }

    /// Number of interpolated axes, 2 or 3.
    #[inline]
    pub fn dims(&self) -> usize {
        3 - self.first_axis
    }

    /// True if the cell holds corners.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Corner samples of the current cell.
    #[inline]
    pub fn corners(&self) -> &[FieldVector] {
        &self.corners[..1 << self.dims()]
    }

    /// True if `q` lies in the half-open bounds `[lo, hi)` of every active axis.
    #[inline]
    pub fn contains(&self, q: [f64; 3]) -> bool {
        self.valid && (self.first_axis..3).all(|a| q[a] >= self.lo[a] && q[a] < self.hi[a])
    }

    /// Load the cell containing `q` from `map`.
    ///
    /// Returns false and empties the cell if `q` is outside the grid on any
    /// active axis.
    pub fn refresh(&mut self, map: &FieldMap, q: [f64; 3]) -> bool {
        debug_assert_eq!(
            self.first_axis == 1,
            map.topology() == Topology::Solenoid,
            "cell dimension does not match map topology"
        );

        let axes = map.axes();
        let seam = match map.phi_seam() {
            Some((lo, hi)) if self.first_axis == 0 && q[0] >= lo && q[0] < hi => Some((lo, hi)),
            _ => None,
        };

        let mut index = [0usize; 3];
        for a in self.first_axis..3 {
            if a == 0 && seam.is_some() {
                index[0] = axes[0].count() - 1;
                continue;
            }
            match axes[a].index_of(q[a]) {
                Some(i) => index[a] = i,
                None => {
                    log::warn!(
                        "cell refresh failed: {}={} outside [{}, {}]",
                        axes[a].name(),
                        q[a],
                        axes[a].min(),
                        axes[a].max()
                    );
                    self.valid = false;
                    return false;
                }
            }
        }

        for a in self.first_axis..3 {
            self.lo[a] = axes[a].value_at(index[a]);
            self.hi[a] = axes[a].value_at(index[a] + 1);
            self.norm[a] = 1.0 / axes[a].delta();
        }

        // φ planes of the lower and upper corners
        let mut planes = [index[0], index[0] + 1];
        if let Some((lo, hi)) = seam {
            self.lo[0] = lo;
            self.hi[0] = hi;
            self.norm[0] = 1.0 / (hi - lo);
            planes = [axes[0].count() - 1, 0];
        }

        let shape = map.shape();
        let samples = map.samples();
        let fetch = |i: usize, j: usize, k: usize| {
            samples
                .get(shape.pack(i, j, k))
                .copied()
                .unwrap_or(FieldVector::ZERO)
        };

        if self.dims() == 3 {
            for c in 0..8 {
                let (di, dj, dk) = corner_from_index_3d(c);
                self.corners[c] = fetch(planes[di], index[1] + dj, index[2] + dk);
            }
        } else {
            for c in 0..4 {
                let (dj, dk) = corner_from_index_2d(c);
                self.corners[c] = fetch(0, index[1] + dj, index[2] + dk);
            }
        }

        self.valid = true;
        true
    }

    /// Field at `q`, which must be contained in the cell.
    #[inline]
    pub fn sample(&self, q: [f64; 3], mode: Interpolation) -> FieldVector {
        debug_assert!(self.valid);
        let f = |a: usize| (q[a] - self.lo[a]) * self.norm[a];

        match (self.dims(), mode) {
            (3, Interpolation::NearestNeighbor) => {
                self.corners[nearest_corner_3d([f(0), f(1), f(2)])]
            }
            (3, Interpolation::Linear) => {
                blend(&self.corners, &trilinear_weights([f(0), f(1), f(2)]))
            }
            (_, Interpolation::NearestNeighbor) => self.corners[nearest_corner_2d([f(1), f(2)])],
            (_, Interpolation::Linear) => {
                blend(&self.corners[..4], &bilinear_weights([f(1), f(2)]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FieldMapBuilder;

    fn linear_solenoid() -> FieldMap {
        FieldMapBuilder::solenoid((0.0, 10.0, 11), (0.0, 20.0, 11))
            .fill_fn(|c| FieldVector::new(0.0, c.rho as f32, c.z as f32))
            .build()
            .unwrap()
    }

    fn linear_toroid() -> FieldMap {
        FieldMapBuilder::toroid((0.0, 30.0, 7), (0.0, 10.0, 11), (0.0, 10.0, 11))
            .fill_fn(|c| FieldVector::new(c.phi as f32, c.rho as f32, c.z as f32))
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_cell_is_empty() {
        let cell = InterpolationCell::new(Topology::Toroid);
        assert!(!cell.is_valid());
        assert!(!cell.contains([0.0; 3]));
        assert_eq!(cell.dims(), 3);
        assert_eq!(InterpolationCell::new(Topology::Solenoid).dims(), 2);
    }

    #[test]
    fn test_refresh_2d_bounds_and_corners() {
        let map = linear_solenoid();
        let mut cell = InterpolationCell::new(map.topology());
        assert!(cell.refresh(&map, [0.0, 3.5, 7.0]));

        assert!(cell.contains([0.0, 3.0, 6.0]));
        assert!(cell.contains([123.0, 3.99, 7.99]));
        assert!(!cell.contains([0.0, 4.0, 7.0]));
        assert!(!cell.contains([0.0, 3.5, 8.0]));

        assert_eq!(cell.corners().len(), 4);
        assert_eq!(cell.corners()[0], FieldVector::new(0.0, 3.0, 6.0));
        assert_eq!(cell.corners()[1], FieldVector::new(0.0, 3.0, 8.0));
        assert_eq!(cell.corners()[2], FieldVector::new(0.0, 4.0, 6.0));
        assert_eq!(cell.corners()[3], FieldVector::new(0.0, 4.0, 8.0));
    }

    #[test]
    fn test_refresh_outside_empties_cell() {
        let map = linear_solenoid();
        let mut cell = InterpolationCell::new(map.topology());
        assert!(cell.refresh(&map, [0.0, 3.5, 7.0]));
        assert!(!cell.refresh(&map, [0.0, 10.5, 7.0]));
        assert!(!cell.is_valid());
        assert!(!cell.contains([0.0, 3.5, 7.0]));
    }

    #[test]
    fn test_nearest_2d() {
        let map = linear_solenoid();
        let mut cell = InterpolationCell::new(map.topology());
        cell.refresh(&map, [0.0, 3.2, 7.9]);
        let v = cell.sample([0.0, 3.2, 7.9], Interpolation::NearestNeighbor);
        assert_eq!(v, FieldVector::new(0.0, 3.0, 8.0));
    }

    #[test]
    fn test_linear_2d_reproduces_linear_field() {
        let map = linear_solenoid();
        let mut cell = InterpolationCell::new(map.topology());
        cell.refresh(&map, [0.0, 3.25, 7.5]);
        let v = cell.sample([0.0, 3.25, 7.5], Interpolation::Linear);
        assert!((v.b2 - 3.25).abs() < 1e-5);
        assert!((v.b3 - 7.5).abs() < 1e-5);
    }

    #[test]
    fn test_refresh_3d() {
        let map = linear_toroid();
        let mut cell = InterpolationCell::new(map.topology());
        assert!(cell.refresh(&map, [12.0, 2.5, 9.9]));
        assert_eq!(cell.corners().len(), 8);
        assert_eq!(cell.corners()[0], FieldVector::new(10.0, 2.0, 9.0));
        assert_eq!(cell.corners()[7], FieldVector::new(15.0, 3.0, 10.0));

        let v = cell.sample([12.0, 2.5, 9.9], Interpolation::NearestNeighbor);
        assert_eq!(v, FieldVector::new(10.0, 3.0, 10.0));

        let v = cell.sample([12.0, 2.5, 9.9], Interpolation::Linear);
        assert!((v.b1 - 12.0).abs() < 1e-4);
        assert!((v.b2 - 2.5).abs() < 1e-5);
        assert!((v.b3 - 9.9).abs() < 1e-5);
    }

    #[test]
    fn test_upper_edge_uses_last_cell() {
        let map = linear_toroid();
        let mut cell = InterpolationCell::new(map.topology());
        assert!(cell.refresh(&map, [30.0, 10.0, 10.0]));
        let v = cell.sample([30.0, 10.0, 10.0], Interpolation::NearestNeighbor);
        assert_eq!(v, FieldVector::new(30.0, 10.0, 10.0));
    }

    #[test]
    fn test_seam_cell_joins_last_and_first_planes() {
        let map = FieldMapBuilder::toroid((0.0, 270.0, 4), (0.0, 10.0, 2), (0.0, 10.0, 2))
            .fill_fn(|c| FieldVector::new(c.phi as f32, 0.0, 0.0))
            .build()
            .unwrap();
        let mut cell = InterpolationCell::new(map.topology());

        assert!(cell.refresh(&map, [315.0, 5.0, 5.0]));
        assert!(cell.contains([270.0, 5.0, 5.0]));
        assert!(cell.contains([359.9, 5.0, 5.0]));
        assert!(!cell.contains([360.0, 5.0, 5.0]));
        assert_eq!(cell.corners()[0].b1, 270.0);
        assert_eq!(cell.corners()[4].b1, 0.0);

        let v = cell.sample([337.5, 5.0, 5.0], Interpolation::Linear);
        assert!((v.b1 - 67.5).abs() < 1e-4);
        let v = cell.sample([337.5, 5.0, 5.0], Interpolation::NearestNeighbor);
        assert_eq!(v.b1, 0.0);
    }
}
