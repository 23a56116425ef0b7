//! Capacity management for [`Sequence`](super::Sequence).
//!
//! The values here are tuning, not correctness requirements: any policy which grows geometrically
//! and shrinks when occupancy gets low keeps pushes and removals amortized `O(1)`.

use std::cmp;

/// The default and minimum capacity of a [`Sequence`](super::Sequence).
pub const MIN_CAP: usize = 2;

/// Growth multiplier while the buffer is below [`THRESHOLD_BYTES`].
pub const SMALL_GROWTH_FACTOR: usize = 4;

/// Growth multiplier once the buffer has reached [`THRESHOLD_BYTES`].
pub const LARGE_GROWTH_FACTOR: usize = 2;

/// The buffer size at which growth slows down, 500MB.
pub const THRESHOLD_BYTES: usize = 500_000_000;

/// A removal shrinks the buffer when fewer than `1 / SHRINK_DIVISOR` of its slots are in use.
pub const SHRINK_DIVISOR: usize = 4;

/// Controls how a [`Sequence`](super::Sequence) grows and shrinks its buffer.
///
/// Each Sequence carries its own policy, which is inherited by sequences derived from it (clones,
/// [`map`](super::Sequence::map), [`filter`](super::Sequence::filter), ...).
///
/// # Examples
/// ```
/// # use evt_collections::collections::contiguous::{GrowthPolicy, Sequence};
/// let policy = GrowthPolicy::new()
///     .with_min_cap(8)
///     .with_small_factor(2);
///
/// let mut seq = Sequence::with_policy(policy);
/// assert_eq!(seq.cap(), 8);
///
/// for i in 0..9 {
///     seq.push(i);
/// }
/// assert_eq!(seq.cap(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrowthPolicy {
    min_cap: usize,
    small_factor: usize,
    large_factor: usize,
    threshold_bytes: usize,
    shrink_divisor: usize,
}

impl GrowthPolicy {
    /// The policy used by [`Sequence::new`](super::Sequence::new).
    pub const DEFAULT: GrowthPolicy = GrowthPolicy {
        min_cap: MIN_CAP,
        small_factor: SMALL_GROWTH_FACTOR,
        large_factor: LARGE_GROWTH_FACTOR,
        threshold_bytes: THRESHOLD_BYTES,
        shrink_divisor: SHRINK_DIVISOR,
    };

    /// Creates the default policy.
    pub const fn new() -> GrowthPolicy {
        GrowthPolicy::DEFAULT
    }

    /// Sets the default and minimum capacity. Values below 1 are raised to 1.
    pub const fn with_min_cap(mut self, min_cap: usize) -> GrowthPolicy {
        self.min_cap = if min_cap == 0 { 1 } else { min_cap };
        self
    }

    /// Sets the growth multiplier used below the threshold. Values below 2 are raised to 2.
    pub const fn with_small_factor(mut self, factor: usize) -> GrowthPolicy {
        self.small_factor = if factor < 2 { 2 } else { factor };
        self
    }

    /// Sets the growth multiplier used at or above the threshold. Values below 2 are raised to 2.
    pub const fn with_large_factor(mut self, factor: usize) -> GrowthPolicy {
        self.large_factor = if factor < 2 { 2 } else { factor };
        self
    }

    /// Sets the buffer size in bytes at which growth switches to the large factor.
    pub const fn with_threshold_bytes(mut self, threshold_bytes: usize) -> GrowthPolicy {
        self.threshold_bytes = threshold_bytes;
        self
    }

    /// Sets the occupancy divisor for shrinking on removal. Values below 1 are raised to 1, where
    /// 1 means that every removal shrinks the buffer to fit.
    pub const fn with_shrink_divisor(mut self, divisor: usize) -> GrowthPolicy {
        self.shrink_divisor = if divisor == 0 { 1 } else { divisor };
        self
    }

    /// Returns the default and minimum capacity.
    pub const fn min_cap(&self) -> usize {
        self.min_cap
    }

    /// Returns the growth multiplier used below the threshold.
    pub const fn small_factor(&self) -> usize {
        self.small_factor
    }

    /// Returns the growth multiplier used at or above the threshold.
    pub const fn large_factor(&self) -> usize {
        self.large_factor
    }

    /// Returns the threshold in bytes.
    pub const fn threshold_bytes(&self) -> usize {
        self.threshold_bytes
    }

    /// Returns the shrink divisor.
    pub const fn shrink_divisor(&self) -> usize {
        self.shrink_divisor
    }

    /// Returns the capacity that a full buffer of `cap` elements of `T` should grow to. The
    /// result is always greater than `cap` unless `cap` is already `usize::MAX`.
    pub fn grown_cap<T>(&self, cap: usize) -> usize {
        let bytes = cap.saturating_mul(size_of::<T>());
        let factor = if bytes < self.threshold_bytes {
            self.small_factor
        } else {
            self.large_factor
        };

        cmp::max(cap.saturating_mul(factor), self.min_cap)
    }

    /// Returns true if a buffer with `cap` slots holding `len` elements should be shrunk.
    pub const fn should_shrink(&self, len: usize, cap: usize) -> bool {
        len.saturating_mul(self.shrink_divisor) < cap
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        GrowthPolicy::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grown_cap() {
        let policy = GrowthPolicy::new();
        assert_eq!(policy.grown_cap::<u8>(0), MIN_CAP, "An empty buffer grows to the minimum.");
        assert_eq!(policy.grown_cap::<u8>(2), 8);
        assert_eq!(policy.grown_cap::<u8>(8), 32);

        let policy = GrowthPolicy::new().with_threshold_bytes(64);
        assert_eq!(policy.grown_cap::<u64>(4), 16, "32 bytes is below the threshold.");
        assert_eq!(policy.grown_cap::<u64>(8), 16, "64 bytes has reached the threshold.");

        assert_eq!(policy.grown_cap::<u64>(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_should_shrink() {
        let policy = GrowthPolicy::new();
        assert!(policy.should_shrink(3, 16));
        assert!(!policy.should_shrink(4, 16), "Exactly a quarter full isn't below a quarter.");
        assert!(policy.should_shrink(3, 15), "3 is below 15 / 4 = 3.75.");
        assert!(!policy.should_shrink(0, 0));
    }

    #[test]
    fn test_clamping() {
        let policy = GrowthPolicy::new()
            .with_min_cap(0)
            .with_small_factor(1)
            .with_large_factor(0)
            .with_shrink_divisor(0);

        assert_eq!(policy.min_cap(), 1);
        assert_eq!(policy.small_factor(), 2);
        assert_eq!(policy.large_factor(), 2);
        assert_eq!(policy.shrink_divisor(), 1);
        assert_eq!(policy.grown_cap::<u8>(0), 1);
    }
}
