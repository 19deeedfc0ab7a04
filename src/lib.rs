//! # bytering - fixed-capacity circular byte buffer
//!
//! A byte ring for producer/consumer streaming in memory-constrained code.
//! Bytes are written at one cursor and consumed at another; both wrap around
//! a fixed backing store that is never reallocated or moved.
//!
//! ## Design
//!
//! - One writer and one reader, no internal locking
//! - One slot always stays free, so `capacity - 1` bytes are usable
//! - Storage is allocated by the ring or lent by the caller
//! - Capacity policy is a type: [`Exact`] or [`PowerOfTwo`] (bitmask wrap)
//! - Bulk copy: `add` / `get` truncate to the available space
//! - Zero-copy: `add_direct` / `get_direct` hand out a window and move the
//!   cursor at once; `reserve_write` / `reserve_read` move it only on commit
//!
//! ## Example
//!
//! ```
//! use bytering::{Exact, RingBuffer};
//!
//! // 16 slots, 15 usable bytes
//! let mut rb = RingBuffer::<Exact>::new(16).unwrap();
//!
//! // Bulk copy truncates to the free space
//! assert_eq!(rb.add(b"0123456789ABCDEF"), 15);
//!
//! let mut out = [0u8; 4];
//! assert_eq!(rb.get(&mut out), 4);
//! assert_eq!(&out, b"0123");
//!
//! // Fill a window in place, commit only what was written
//! let mut grant = rb.reserve_write(2);
//! grant.buf()[0] = b'!';
//! grant.commit(1).unwrap();
//! assert_eq!(rb.full_space(), 12);
//! ```
//!
//! ## Feature Flags
//!
//! - **`power-of-two`**: makes [`PowerOfTwo`] the [`DefaultSizing`].
//! - **`cli`**: builds the `ringdemo` binary.

#![warn(missing_docs)]

mod error;
mod grant;
mod ring_buffer;
pub mod sizing;
mod storage;

pub use error::{Result, RingError};
pub use grant::{ReadGrant, WriteGrant};
pub use ring_buffer::{RingBuffer, MIN_CAPACITY};
pub use sizing::{DefaultSizing, Exact, PowerOfTwo, Sizing};
