//! Aggregate field statistics computed once at load.

use magfield_core::FieldVector;

/// Magnitude statistics of a map's samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldMetrics {
    /// Flat index of the largest-magnitude sample (0 if every sample is zero).
    pub max_index: usize,
    /// Largest sample magnitude.
    pub max_magnitude: f64,
    /// Mean sample magnitude.
    pub avg_magnitude: f64,
}

/// Scan `samples` once for the largest and mean magnitude.
///
/// The first sample wins ties. An empty slice yields all zeros.
pub fn compute_metrics(samples: &[FieldVector]) -> FieldMetrics {
    let mut metrics = FieldMetrics::default();

    for (i, sample) in samples.iter().enumerate() {
        let magnitude = sample.magnitude();
        if magnitude > metrics.max_magnitude {
            metrics.max_magnitude = magnitude;
            metrics.max_index = i;
        }
        metrics.avg_magnitude += (magnitude - metrics.avg_magnitude) / (i + 1) as f64;
    }

    metrics
}
