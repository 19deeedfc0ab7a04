use crate::error::{Result, RingError};

/// Backing bytes of a ring, either allocated by the ring or lent by the caller.
///
/// Both variants expose exactly `capacity` bytes. Owned bytes are released
/// when the storage drops; borrowed bytes go back to the caller untouched past
/// `capacity`.
pub(crate) enum Storage<'a> {
    Owned(Box<[u8]>),
    Borrowed(&'a mut [u8]),
}

impl<'a> Storage<'a> {
    /// Allocates `capacity` zeroed bytes, reporting allocator failure.
    pub(crate) fn allocate(capacity: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|source| RingError::Alloc {
                size: capacity,
                source,
            })?;
        bytes.resize(capacity, 0);
        Ok(Storage::Owned(bytes.into_boxed_slice()))
    }

    /// Lends the first `capacity` bytes of `buf`.
    ///
    /// `buf` must hold at least `capacity` bytes.
    pub(crate) fn borrow(buf: &'a mut [u8], capacity: usize) -> Self {
        let (used, _) = buf.split_at_mut(capacity);
        Storage::Borrowed(used)
    }

    pub(crate) fn is_owned(&self) -> bool {
        matches!(self, Storage::Owned(_))
    }

    #[inline]
    pub(crate) fn bytes(&self) -> &[u8] {
        match self {
            Storage::Owned(bytes) => &bytes[..],
            Storage::Borrowed(bytes) => &bytes[..],
        }
    }

    #[inline]
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Owned(bytes) => &mut bytes[..],
            Storage::Borrowed(bytes) => &mut bytes[..],
        }
    }
}
