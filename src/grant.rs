//! Two-phase windows into the ring storage.
//!
//! A grant borrows the ring mutably, so no other operation can run while it
//! is alive. The cursor only moves when the grant is committed or released;
//! dropping it is a no-op.

use crate::error::{Result, RingError};
use crate::ring_buffer::RingBuffer;
use crate::sizing::Sizing;

/// Writable window obtained from [`RingBuffer::reserve_write`]
#[must_use = "a write grant does nothing until it is committed"]
#[derive(Debug)]
pub struct WriteGrant<'r, 'a, S: Sizing> {
    ring: &'r mut RingBuffer<'a, S>,
    start: usize,
    len: usize,
}

impl<'r, 'a, S: Sizing> WriteGrant<'r, 'a, S> {
    pub(crate) fn new(ring: &'r mut RingBuffer<'a, S>, start: usize, len: usize) -> Self {
        WriteGrant { ring, start, len }
    }

    /// Length of the window
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The window itself
    pub fn buf(&mut self) -> &mut [u8] {
        self.ring.window_mut(self.start, self.len)
    }

    /// Make the first `used` bytes of the window readable
    ///
    /// # Returns
    /// * `Ok(used)` on success
    /// * `Err(RingError::GrantExceeded)` if `used` is longer than the window;
    ///   the ring is left unchanged
    pub fn commit(self, used: usize) -> Result<usize> {
        if used > self.len {
            return Err(RingError::GrantExceeded {
                granted: self.len,
                committed: used,
            });
        }
        self.ring.advance_write(used);
        Ok(used)
    }
}

/// Readable window obtained from [`RingBuffer::reserve_read`]
#[must_use = "a read grant does nothing until it is released"]
#[derive(Debug)]
pub struct ReadGrant<'r, 'a, S: Sizing> {
    ring: &'r mut RingBuffer<'a, S>,
    start: usize,
    len: usize,
}

impl<'r, 'a, S: Sizing> ReadGrant<'r, 'a, S> {
    pub(crate) fn new(ring: &'r mut RingBuffer<'a, S>, start: usize, len: usize) -> Self {
        ReadGrant { ring, start, len }
    }

    /// Length of the window
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The window itself
    pub fn buf(&self) -> &[u8] {
        self.ring.window(self.start, self.len)
    }

    /// Consume the first `used` bytes of the window
    ///
    /// Fails with `RingError::GrantExceeded` if `used` is longer than the
    /// window, leaving the ring unchanged.
    pub fn release(self, used: usize) -> Result<usize> {
        if used > self.len {
            return Err(RingError::GrantExceeded {
                granted: self.len,
                committed: used,
            });
        }
        self.ring.advance_read(used);
        Ok(used)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RingError;
    use crate::sizing::{Exact, PowerOfTwo};
    use crate::RingBuffer;

    #[test]
    fn test_commit_partial_write() {
        let mut rb = RingBuffer::<Exact>::new(8).unwrap();
        let mut grant = rb.reserve_write(4);
        assert_eq!(grant.len(), 4);
        grant.buf().copy_from_slice(b"abcd");
        assert_eq!(grant.commit(2).unwrap(), 2);

        assert_eq!(rb.full_space(), 2);
        let mut out = [0u8; 4];
        assert_eq!(rb.get(&mut out), 2);
        assert_eq!(&out[..2], b"ab");
    }

    #[test]
    fn test_dropped_grant_leaves_ring_untouched() {
        let mut rb = RingBuffer::<Exact>::new(8).unwrap();
        {
            let mut grant = rb.reserve_write(6);
            grant.buf().fill(b'z');
        }
        assert!(rb.is_empty());
        assert_eq!(rb.free_space(), 7);

        assert_eq!(rb.add(b"ok"), 2);
        let mut out = [0u8; 8];
        assert_eq!(rb.get(&mut out), 2);
        assert_eq!(&out[..2], b"ok");
    }

    #[test]
    fn test_commit_past_grant_fails() {
        let mut rb = RingBuffer::<PowerOfTwo>::new(8).unwrap();
        let err = rb.reserve_write(4).commit(5).unwrap_err();
        assert!(matches!(
            err,
            RingError::GrantExceeded {
                granted: 4,
                committed: 5
            }
        ));
        assert!(rb.is_empty());
    }

    #[test]
    fn test_write_grant_limited_to_linear_space() {
        let mut rb = RingBuffer::<Exact>::new(8).unwrap();
        assert_eq!(rb.reserve_write(100).len(), rb.free_linear_space());
        assert!(rb.reserve_read(100).is_empty());
    }

    #[test]
    fn test_release_partial_read() {
        let mut rb = RingBuffer::<Exact>::new(8).unwrap();
        rb.add(b"hello");

        let grant = rb.reserve_read(3);
        assert_eq!(grant.buf(), b"hel");
        assert_eq!(grant.release(1).unwrap(), 1);

        assert_eq!(rb.full_space(), 4);
        let mut out = [0u8; 4];
        assert_eq!(rb.get(&mut out), 4);
        assert_eq!(&out, b"ello");
    }

    #[test]
    fn test_release_past_grant_fails() {
        let mut rb = RingBuffer::<Exact>::new(8).unwrap();
        rb.add(b"abc");
        let err = rb.reserve_read(2).release(3).unwrap_err();
        assert!(matches!(err, RingError::GrantExceeded { granted: 2, committed: 3 }));
        assert_eq!(rb.full_space(), 3);
    }
}
