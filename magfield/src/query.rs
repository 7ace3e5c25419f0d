//! Batch query interface for FieldMap.
//!
//! Extends the map with batch queries; the parallel variant (feature `rayon`)
//! gives every worker its own probe.

use magfield_core::{FieldVector, Point3};

use crate::composite::CompositeProbe;
use crate::map::FieldMap;

impl FieldMap {
    /// Query many points with a single cached probe.
    ///
    /// Ordered points along a trajectory hit the cache most of the time.
    pub fn field_batch(&self, points: &[Point3]) -> Vec<FieldVector> {
        let mut probe = self.probe();
        points.iter().map(|p| probe.field(*p)).collect()
    }

    /// Query many points in parallel, one probe per worker.
    ///
    /// Results are in the order of `points`.
    #[cfg(feature = "rayon")]
    pub fn field_batch_par(&self, points: &[Point3]) -> Vec<FieldVector> {
        use rayon::prelude::*;

        points
            .par_iter()
            .map_init(|| self.probe(), |probe, p| probe.field(*p))
            .collect()
    }
}

impl<'a> CompositeProbe<'a> {
    /// Summed field at many points.
    pub fn field_batch(&mut self, points: &[Point3]) -> Vec<FieldVector> {
        points.iter().map(|p| self.field(*p)).collect()
    }
}
