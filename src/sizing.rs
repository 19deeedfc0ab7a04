//! Capacity policies.
//!
//! A policy decides how a requested size maps to the number of slots the ring
//! actually uses, and how an index past the end folds back into range. The
//! policy is a type parameter of [`RingBuffer`](crate::RingBuffer), so both
//! can live in one binary.

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Exact {}
    impl Sealed for super::PowerOfTwo {}
}

/// Maps a requested size to a capacity and wraps cursor indices.
///
/// This trait is sealed; the crate provides [`Exact`] and [`PowerOfTwo`].
pub trait Sizing: sealed::Sealed {
    /// Short name used in logs and `Debug` output.
    const NAME: &'static str;

    /// Effective capacity for a requested size.
    fn resolve(requested: usize) -> usize;

    /// Folds `index` into `[0, capacity)`.
    ///
    /// Callers only pass indices below `2 * capacity`.
    fn wrap(index: usize, capacity: usize) -> usize;
}

/// Uses the requested size as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exact;

/// Rounds down to the largest power of two and wraps with a bitmask.
///
/// Gives up up to half of the requested bytes in exchange for never dividing
/// on the hot path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerOfTwo;

impl Sizing for Exact {
    const NAME: &'static str = "exact";

    #[inline]
    fn resolve(requested: usize) -> usize {
        requested
    }

    #[inline]
    fn wrap(index: usize, capacity: usize) -> usize {
        index % capacity
    }
}

impl Sizing for PowerOfTwo {
    const NAME: &'static str = "power-of-two";

    #[inline]
    fn resolve(requested: usize) -> usize {
        if requested == 0 {
            return 0;
        }
        1 << requested.ilog2()
    }

    #[inline]
    fn wrap(index: usize, capacity: usize) -> usize {
        index & (capacity - 1)
    }
}

/// Policy used when [`RingBuffer`](crate::RingBuffer) is named without one.
///
/// [`Exact`] unless the `power-of-two` feature is enabled.
#[cfg(not(feature = "power-of-two"))]
pub type DefaultSizing = Exact;

/// Policy used when [`RingBuffer`](crate::RingBuffer) is named without one.
///
/// [`PowerOfTwo`] because the `power-of-two` feature is enabled.
#[cfg(feature = "power-of-two")]
pub type DefaultSizing = PowerOfTwo;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_keeps_size() {
        for n in [2, 9, 16, 17, 19, 35, 1000] {
            assert_eq!(Exact::resolve(n), n);
        }
    }

    #[test]
    fn test_power_of_two_rounds_down() {
        assert_eq!(PowerOfTwo::resolve(19), 16);
        assert_eq!(PowerOfTwo::resolve(35), 32);
        assert_eq!(PowerOfTwo::resolve(17), 16);
        assert_eq!(PowerOfTwo::resolve(16), 16);
        assert_eq!(PowerOfTwo::resolve(9), 8);
        assert_eq!(PowerOfTwo::resolve(2), 2);
        assert_eq!(PowerOfTwo::resolve(1), 1);
        assert_eq!(PowerOfTwo::resolve(0), 0);
    }

    #[test]
    fn test_power_of_two_is_power_and_not_above_request() {
        for n in 1..4096usize {
            let cap = PowerOfTwo::resolve(n);
            assert!(cap.is_power_of_two());
            assert!(cap <= n);
            assert!(cap * 2 > n);
        }
    }

    #[test]
    fn test_wrap_agrees_between_policies() {
        let cap = 16;
        for index in 0..2 * cap {
            assert_eq!(Exact::wrap(index, cap), PowerOfTwo::wrap(index, cap));
        }
        assert_eq!(Exact::wrap(20, 9), 2);
    }
}
