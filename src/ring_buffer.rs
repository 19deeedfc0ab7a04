use std::fmt;
use std::io;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::error::{Result, RingError};
use crate::grant::{ReadGrant, WriteGrant};
use crate::sizing::{DefaultSizing, Sizing};
use crate::storage::Storage;

/// Smallest capacity that leaves at least one usable byte
pub const MIN_CAPACITY: usize = 2;

/// Fixed-capacity circular byte buffer
///
/// - Single writer, single reader, no internal locking
/// - One slot is always kept free so that `write == read` means empty
/// - Storage is either allocated by the ring or borrowed from the caller
/// - `S` picks how the requested size becomes the capacity, see [`Sizing`]
pub struct RingBuffer<'a, S: Sizing = DefaultSizing> {
    /// Backing bytes, exactly `capacity` long
    storage: Storage<'a>,
    /// Effective slot count after sizing
    capacity: usize,
    /// Next slot to be written
    write: usize,
    /// Next slot to be read
    read: usize,
    _sizing: PhantomData<S>,
}

impl<S: Sizing> RingBuffer<'static, S> {
    /// Create a ring that allocates and owns its storage
    ///
    /// # Arguments
    /// * `requested` - Requested size in bytes, resolved through `S`
    ///
    /// # Returns
    /// * `Ok(RingBuffer)` on success
    /// * `Err(RingError::CapacityTooSmall)` if fewer than two slots result
    /// * `Err(RingError::Alloc)` if the allocation fails
    pub fn new(requested: usize) -> Result<Self> {
        Self::create(requested, None)
    }
}

impl<'a, S: Sizing> RingBuffer<'a, S> {
    /// Create a ring over caller storage
    ///
    /// The ring only touches the first [`capacity`](Self::capacity) bytes of
    /// `buf` and never frees it. `buf` must hold at least `requested` bytes.
    pub fn with_buffer(buf: &'a mut [u8], requested: usize) -> Result<Self> {
        Self::create(requested, Some(buf))
    }

    /// Create a ring, borrowing `external` when given and allocating otherwise
    pub fn create(requested: usize, external: Option<&'a mut [u8]>) -> Result<Self> {
        let capacity = S::resolve(requested);
        if requested < MIN_CAPACITY || capacity < MIN_CAPACITY {
            debug!(requested, capacity, sizing = S::NAME, "ring capacity too small");
            return Err(RingError::CapacityTooSmall {
                requested,
                capacity,
            });
        }

        let storage = match external {
            Some(buf) => {
                if buf.len() < requested {
                    debug!(len = buf.len(), requested, "external ring buffer too short");
                    return Err(RingError::BufferTooSmall {
                        len: buf.len(),
                        requested,
                    });
                }
                Storage::borrow(buf, capacity)
            }
            None => Storage::allocate(capacity)
                .inspect_err(|err| debug!(capacity, %err, "ring allocation failed"))?,
        };

        debug!(
            requested,
            capacity,
            sizing = S::NAME,
            owned = storage.is_owned(),
            "created ring"
        );

        Ok(RingBuffer {
            storage,
            capacity,
            write: 0,
            read: 0,
            _sizing: PhantomData,
        })
    }

    /// Slot count after sizing. One slot fewer than this is usable.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most bytes the ring can hold at once
    pub fn usable(&self) -> usize {
        self.capacity - 1
    }

    /// Whether the storage was allocated by the ring
    pub fn is_owned(&self) -> bool {
        self.storage.is_owned()
    }

    /// Name of the sizing policy
    pub fn sizing(&self) -> &'static str {
        S::NAME
    }

    #[inline]
    fn occupied(&self) -> usize {
        if self.write >= self.read {
            self.write - self.read
        } else {
            self.capacity - self.read + self.write
        }
    }

    /// Bytes that can still be written before the ring is full
    #[inline]
    pub fn free_space(&self) -> usize {
        self.usable() - self.occupied()
    }

    /// Bytes available to read
    #[inline]
    pub fn full_space(&self) -> usize {
        self.occupied()
    }

    /// Free bytes reachable from the write cursor without wrapping
    ///
    /// While the reader sits on slot 0 the window stops two slots short of
    /// the physical end, so a direct write never lands the cursor on the
    /// reader. Once the reader has left slot 0 the window runs all the way to
    /// the physical end with nothing held back. Never exceeds
    /// [`free_space`](Self::free_space).
    #[inline]
    pub fn free_linear_space(&self) -> usize {
        if self.write < self.read {
            self.read - self.write - 1
        } else if self.read == 0 {
            (self.capacity - self.write).saturating_sub(2)
        } else {
            self.capacity - self.write
        }
    }

    /// Occupied bytes reachable from the read cursor without wrapping
    #[inline]
    pub fn full_linear_space(&self) -> usize {
        if self.write >= self.read {
            self.write - self.read
        } else {
            self.capacity - self.read
        }
    }

    /// True when nothing is left to read
    pub fn is_empty(&self) -> bool {
        self.write == self.read
    }

    /// True when no more bytes can be written
    pub fn is_full(&self) -> bool {
        self.free_space() == 0
    }

    /// Drop all unread bytes and rewind both cursors
    pub fn clear(&mut self) {
        self.write = 0;
        self.read = 0;
    }

    /// Copy as much of `src` as fits into the ring
    ///
    /// Writes `min(src.len(), free_space())` bytes, wrapping past the physical
    /// end when needed, and returns that count. Over-long input is truncated,
    /// not rejected.
    pub fn add(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.free_space());
        if n < src.len() {
            trace!(requested = src.len(), written = n, "ring add truncated");
        }
        if n == 0 {
            return 0;
        }

        let start = self.write;
        let first = n.min(self.capacity - start);
        let bytes = self.storage.bytes_mut();
        bytes[start..start + first].copy_from_slice(&src[..first]);
        bytes[..n - first].copy_from_slice(&src[first..n]);

        self.write = S::wrap(start + n, self.capacity);
        n
    }

    /// Copy up to `dst.len()` unread bytes out of the ring
    ///
    /// Returns the number of bytes copied; an empty ring yields 0.
    pub fn get(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.full_space());
        if n < dst.len() {
            trace!(requested = dst.len(), read = n, "ring get truncated");
        }
        if n == 0 {
            return 0;
        }

        let start = self.read;
        let first = n.min(self.capacity - start);
        let bytes = self.storage.bytes();
        dst[..first].copy_from_slice(&bytes[start..start + first]);
        dst[first..n].copy_from_slice(&bytes[..n - first]);

        self.read = S::wrap(start + n, self.capacity);
        n
    }

    /// Hand out a writable window at the write cursor and commit it at once
    ///
    /// The window is `min(max_len, free_linear_space())` bytes long and the
    /// write cursor has already moved past it when this returns. Every byte of
    /// the window counts as written data: whatever the caller leaves
    /// untouched is read back as the stale contents of the storage. Use
    /// [`reserve_write`](Self::reserve_write) to commit only what was filled.
    pub fn add_direct(&mut self, max_len: usize) -> &mut [u8] {
        let start = self.write;
        let len = max_len.min(self.free_linear_space());
        self.write = S::wrap(start + len, self.capacity);
        &mut self.storage.bytes_mut()[start..start + len]
    }

    /// Hand out a readable window at the read cursor and consume it at once
    ///
    /// The window is `min(max_len, full_linear_space())` bytes long. The read
    /// cursor has already moved, so the bytes belong to the writer again as
    /// soon as the window is dropped.
    pub fn get_direct(&mut self, max_len: usize) -> &[u8] {
        let start = self.read;
        let len = max_len.min(self.full_linear_space());
        self.read = S::wrap(start + len, self.capacity);
        &self.storage.bytes()[start..start + len]
    }

    /// Reserve a writable window without moving the write cursor
    ///
    /// Only the length passed to [`WriteGrant::commit`] becomes readable.
    /// Dropping the grant leaves the ring as it was.
    pub fn reserve_write(&mut self, max_len: usize) -> WriteGrant<'_, 'a, S> {
        let len = max_len.min(self.free_linear_space());
        let start = self.write;
        WriteGrant::new(self, start, len)
    }

    /// Reserve a readable window without moving the read cursor
    ///
    /// Only the length passed to [`ReadGrant::release`] is consumed.
    pub fn reserve_read(&mut self, max_len: usize) -> ReadGrant<'_, 'a, S> {
        let len = max_len.min(self.full_linear_space());
        let start = self.read;
        ReadGrant::new(self, start, len)
    }

    pub(crate) fn window(&self, start: usize, len: usize) -> &[u8] {
        &self.storage.bytes()[start..start + len]
    }

    pub(crate) fn window_mut(&mut self, start: usize, len: usize) -> &mut [u8] {
        &mut self.storage.bytes_mut()[start..start + len]
    }

    pub(crate) fn advance_write(&mut self, n: usize) {
        self.write = S::wrap(self.write + n, self.capacity);
    }

    pub(crate) fn advance_read(&mut self, n: usize) {
        self.read = S::wrap(self.read + n, self.capacity);
    }
}

impl<S: Sizing> Drop for RingBuffer<'_, S> {
    fn drop(&mut self) {
        trace!(
            capacity = self.capacity,
            owned = self.storage.is_owned(),
            unread = self.occupied(),
            "dropping ring"
        );
    }
}

impl<S: Sizing> fmt::Debug for RingBuffer<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("sizing", &S::NAME)
            .field("capacity", &self.capacity)
            .field("owned", &self.storage.is_owned())
            .field("write_cursor", &self.write)
            .field("read_cursor", &self.read)
            .field("free_space", &self.free_space())
            .field("full_space", &self.full_space())
            .field("free_linear_space", &self.free_linear_space())
            .field("full_linear_space", &self.full_linear_space())
            .finish()
    }
}

/// Writes go through [`RingBuffer::add`]; a full ring accepts 0 bytes.
impl<S: Sizing> io::Write for RingBuffer<'_, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.add(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reads go through [`RingBuffer::get`]; an empty ring reads `Ok(0)`.
impl<S: Sizing> io::Read for RingBuffer<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.get(buf))
    }
}
