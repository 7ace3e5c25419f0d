//! Superposition of several field maps.
//!
//! Magnetic fields add linearly, so a detector with several magnets is
//! queried by summing the field of each map at the same point.

use magfield_core::{FieldVector, Point3};

use crate::map::FieldMap;
use crate::probe::FieldProbe;

/// Sum of the fields of `maps` at `point`, uncached.
pub fn composite_field_at(maps: &[&FieldMap], point: Point3) -> FieldVector {
    let mut total = FieldVector::ZERO;
    for map in maps {
        total += map.field_at(point);
    }
    total
}

/// Cached superposition query: one probe, and so one independent cell, per map.
#[derive(Debug, Clone)]
pub struct CompositeProbe<'a> {
    probes: Vec<FieldProbe<'a>>,
}

impl<'a> CompositeProbe<'a> {
    /// Create a probe over `maps`.
    pub fn new(maps: &[&'a FieldMap]) -> Self {
        Self {
            probes: maps.iter().map(|map| map.probe()).collect(),
        }
    }

    /// Number of contributing maps.
    #[inline]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// True if no map contributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Per-map probes, in the order the maps were given.
    #[inline]
    pub fn probes(&self) -> &[FieldProbe<'a>] {
        &self.probes
    }

    /// Sum of the fields at `point`.
    pub fn field(&mut self, point: Point3) -> FieldVector {
        let mut total = FieldVector::ZERO;
        for probe in &mut self.probes {
            total += probe.field(point);
        }
        total
    }
}
