//! Composite (flat) index of the sample array.
//!
//! Samples are stored slow→fast: the first axis (φ) varies slowest and the
//! third axis (z) quickest, so the flat offset of `(n1, n2, n3)` is
//! `n1 * (N2 * N3) + n2 * N3 + n3`.

/// Bijective mapping between per-axis index triples and flat offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeIndex {
    n1: usize,
    n2: usize,
    n3: usize,
    /// Cached `N2 * N3`, the stride of the slow axis.
    plane: usize,
}

impl CompositeIndex {
    /// Create a composite index for axis counts `(N1, N2, N3)`.
    #[inline]
    pub const fn new(n1: usize, n2: usize, n3: usize) -> Self {
        Self {
            n1,
            n2,
            n3,
            plane: n2 * n3,
        }
    }

    /// Per-axis counts.
    #[inline]
    pub const fn dims(&self) -> (usize, usize, usize) {
        (self.n1, self.n2, self.n3)
    }

    /// Total number of samples, `N1 * N2 * N3`.
    #[inline]
    pub const fn len(&self) -> usize {
        self.n1 * self.plane
    }

    /// True if any axis count is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat offset of `(n1, n2, n3)`.
    ///
    /// No range check is made in release builds; callers resolve indices via
    /// `GridAxis::index_of` first.
    #[inline]
    pub fn pack(&self, n1: usize, n2: usize, n3: usize) -> usize {
        debug_assert!(n1 < self.n1 && n2 < self.n2 && n3 < self.n3);
        n1 * self.plane + n2 * self.n3 + n3
    }

    /// Inverse of [`pack`](Self::pack), or `None` when `flat` is out of range.
    #[inline]
    pub fn unpack(&self, flat: usize) -> Option<(usize, usize, usize)> {
        if flat >= self.len() {
            return None;
        }
        let n1 = flat / self.plane;
        let rest = flat % self.plane;
        Some((n1, rest / self.n3, rest % self.n3))
    }
}
