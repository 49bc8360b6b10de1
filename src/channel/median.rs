//! Median filter over a fixed-capacity sample buffer

use heapless::Vec;

/// Median filter of odd size `N`
///
/// Collects up to `N` samples and returns the middle one after sorting.
/// `N` must be odd (and therefore at least 1) so there is always a single
/// middle element; this is checked at compile time.
///
/// ```compile_fail
/// use stm32_periph::channel::MedianFilter;
///
/// let filter = MedianFilter::<4>::new();
/// ```
#[derive(Clone, Debug)]
pub struct MedianFilter<const N: usize> {
    samples: Vec<f32, N>,
}

impl<const N: usize> MedianFilter<N> {
    /// Evaluated when a filter of size `N` is instantiated
    pub(crate) const SIZE_CHECK: () = assert!(
        N % 2 == 1,
        "the median filter size must be an odd number greater or equal to 1"
    );

    /// Create an empty filter
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::SIZE_CHECK;
        Self { samples: Vec::new() }
    }

    /// Add a sample; returns `false` if the filter is already full
    pub fn push(&mut self, sample: f32) -> bool {
        self.samples.push(sample).is_ok()
    }

    /// Number of samples collected
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if no samples were collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check if `N` samples were collected
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.samples.len() == N
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Sort the samples and return the middle one
    ///
    /// With a full filter this is the element at index `N / 2`.
    #[must_use]
    pub fn median(&mut self) -> Option<f32> {
        self.samples.sort_unstable_by(f32::total_cmp);
        self.samples.get(self.samples.len() / 2).copied()
    }
}

impl<const N: usize> Default for MedianFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample() {
        let mut filter = MedianFilter::<1>::new();
        assert!(filter.push(42.0));
        assert!(filter.is_full());
        assert_eq!(filter.median(), Some(42.0));
    }

    #[test]
    fn rejects_overflow() {
        let mut filter = MedianFilter::<3>::new();
        assert!(filter.push(1.0));
        assert!(filter.push(2.0));
        assert!(filter.push(3.0));
        assert!(!filter.push(4.0));
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn unsorted_input() {
        let mut filter = MedianFilter::<5>::new();
        for v in [9.0, 1.0, 7.0, 3.0, 5.0] {
            filter.push(v);
        }
        assert_eq!(filter.median(), Some(5.0));
    }

    #[test]
    fn outlier_rejected() {
        let mut filter = MedianFilter::<3>::new();
        for v in [25.0, 100.0, 24.0] {
            filter.push(v);
        }
        assert_eq!(filter.median(), Some(25.0));
    }

    #[test]
    fn empty_has_no_median() {
        let mut filter = MedianFilter::<3>::new();
        assert!(filter.is_empty());
        assert_eq!(filter.median(), None);
    }

    #[test]
    fn clear_allows_refill() {
        let mut filter = MedianFilter::<3>::new();
        for v in [1.0, 2.0, 3.0] {
            filter.push(v);
        }
        filter.clear();
        assert!(filter.is_empty());
        for v in [30.0, 10.0, 20.0] {
            assert!(filter.push(v));
        }
        assert_eq!(filter.median(), Some(20.0));
    }
}
