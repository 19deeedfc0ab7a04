use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by [`RingBuffer`](crate::RingBuffer).
///
/// Requests larger than the available space are never errors; they are
/// truncated and the returned count says how much was served.
#[derive(Error, Debug)]
pub enum RingError {
    /// The requested size resolves to fewer than [`MIN_CAPACITY`](crate::MIN_CAPACITY) slots.
    #[error("ring: requested size {requested} resolves to capacity {capacity}, need at least {min}", min = crate::MIN_CAPACITY)]
    CapacityTooSmall {
        /// Size passed by the caller
        requested: usize,
        /// Capacity after the sizing policy was applied
        capacity: usize,
    },

    /// The caller supplied storage shorter than the requested size.
    #[error("ring: external buffer holds {len} bytes, {requested} requested")]
    BufferTooSmall {
        /// Length of the caller's buffer
        len: usize,
        /// Size passed by the caller
        requested: usize,
    },

    /// Internal storage could not be allocated.
    #[error("ring: failed to allocate {size} bytes")]
    Alloc {
        /// Number of bytes that were requested from the allocator
        size: usize,
        /// Allocator failure
        #[source]
        source: TryReserveError,
    },

    /// A grant was committed or released with more bytes than it covers.
    #[error("ring: {committed} bytes exceed the {granted}-byte grant")]
    GrantExceeded {
        /// Length of the window that was handed out
        granted: usize,
        /// Length the caller tried to commit
        committed: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RingError>;
