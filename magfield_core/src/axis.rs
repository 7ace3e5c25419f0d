//! Uniformly spaced 1-D coordinate axis.
//!
//! A field map is sampled on the tensor product of three such axes. Each axis
//! maps a coordinate value to the lower-corner index of the unit cell holding
//! it, and an index back to its coordinate value.

use crate::error::CoreError;

/// An immutable, evenly spaced coordinate axis.
///
/// With `count > 1` the values are `min + i * delta` for `i in 0..count`, with
/// `delta = (max - min) / (count - 1)`. An axis with a single point is
/// *degenerate*: `delta` is infinite and every value maps to index 0 (this is
/// the azimuthal axis of an axisymmetric solenoid map).
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    name: &'static str,
    min: f64,
    max: f64,
    count: usize,
    delta: f64,
}

impl GridAxis {
    /// Create an axis from its bounds and number of points (ends included).
    ///
    /// # Errors
    /// * `EmptyAxis` if `count == 0`
    /// * `InvalidBounds` if a bound is not finite, `max < min`, or `max == min`
    ///   while `count > 1`
    pub fn new(name: &'static str, min: f64, max: f64, count: usize) -> Result<Self, CoreError> {
        if count == 0 {
            return Err(CoreError::EmptyAxis { name });
        }
        if !min.is_finite() || !max.is_finite() || max < min || (count > 1 && max == min) {
            return Err(CoreError::InvalidBounds { name, min, max });
        }

        let delta = if count > 1 {
            (max - min) / (count - 1) as f64
        } else {
            f64::INFINITY
        };

        Ok(Self {
            name,
            min,
            max,
            count,
            delta,
        })
    }

    /// Coordinate name, e.g. `"phi"`.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Smallest value on the axis.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest value on the axis.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of points, ends included.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Spacing between neighbouring points (infinite for a degenerate axis).
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// `max - min`.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True for a single-point axis.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.count < 2
    }

    /// True if `value` lies in the closed range `[min, max]`.
    ///
    /// A degenerate axis contains every value. NaN is never contained.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.is_degenerate() || (value >= self.min && value <= self.max)
    }

    /// Lower-corner index of the cell containing `value`.
    ///
    /// Returns an index in `[0, count - 2]` such that
    /// `value_at(i) <= value < value_at(i + 1)`, except at `value == max`
    /// which belongs to the last cell. Values outside `[min, max]` (and NaN)
    /// return `None`. A degenerate axis always returns `Some(0)`.
    #[inline]
    pub fn index_of(&self, value: f64) -> Option<usize> {
        if self.is_degenerate() {
            return Some(0);
        }
        if !(value >= self.min && value <= self.max) {
            return None;
        }

        let last = self.count - 2;
        // value >= min, so truncation is floor
        let mut index = (((value - self.min) / self.delta) as usize).min(last);

        // rounding in the division can land one cell off at exact grid values
        if index > 0 && value < self.value_at(index) {
            index -= 1;
        } else if index < last && value >= self.value_at(index + 1) {
            index += 1;
        }
        Some(index)
    }

    /// Coordinate value at `index`, or NaN if `index >= count`.
    #[inline]
    pub fn value_at(&self, index: usize) -> f64 {
        if index >= self.count {
            f64::NAN
        } else if index == 0 {
            self.min
        } else if index + 1 == self.count {
            self.max
        } else {
            self.min + index as f64 * self.delta
        }
    }

    /// Iterate over all values of the axis.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(move |i| self.value_at(i))
    }
}
