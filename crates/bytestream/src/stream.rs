//! The ring storage engine.
//!
//! Layout
//! - `storage` is a boxed byte array whose length (the physical capacity) is
//!   the smallest multiple of eight strictly above the logical capacity, so a
//!   full stream never has `head == tail`.
//! - `head` addresses the oldest unread byte and `tail` the next free slot.
//!   Both advance through `ByteStream::advance`, the only place that applies
//!   the physical modulus.
//! - A logical run of bytes starting at some index may cross the physical end;
//!   `ByteStream::runs` splits it into at most two physical ranges. Writes,
//!   reads, peeks and line reads all copy through it.
//!
//! Invariants
//! - `used + free == capacity` and `used <= capacity`.
//! - `head < physical` and `tail < physical`.
//! - `tail == (head + used) % physical`.
//! - A failed call returns before any of the above fields is written.

use alloc::{boxed::Box, vec::Vec};
use core::{fmt, ops::Range};

use bstr::ByteSlice;

use crate::{ByteStreamError, ByteStreamOptions, Status, options::MAX_CAPACITY};

/// Where bytes removed by [`ByteStream::read`] go.
#[derive(Debug)]
pub enum Destination<'a> {
    /// Copy the bytes into this slice; its length is the number of bytes read.
    Buffer(&'a mut [u8]),
    /// Drop this many bytes without copying them anywhere.
    Discard(u32),
}

impl Destination<'_> {
    fn len(&self) -> usize {
        match self {
            Destination::Buffer(buf) => buf.len(),
            Destination::Discard(n) => *n as usize,
        }
    }
}

/// A fixed-capacity FIFO of bytes.
///
/// One producer calls [`write`](Self::write); one consumer calls
/// [`read`](Self::read), [`peek`](Self::peek) or
/// [`read_line`](Self::read_line). Every mutating call takes `&mut self`; share
/// a stream between threads behind a lock.
pub struct ByteStream {
    storage: Box<[u8]>,
    capacity: u32,
    head: u32,
    tail: u32,
    used: u32,
    free: u32,
}

impl ByteStream {
    /// Allocates a stream with the configured capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ByteStreamError::AllocationFailure`] if the storage array
    /// cannot be allocated.
    ///
    /// # Panics
    ///
    /// Panics if `options.capacity` is zero or greater than
    /// [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn new(options: ByteStreamOptions) -> Result<Self, ByteStreamError> {
        let capacity = options.capacity;
        assert!(capacity > 0, "ByteStream capacity must be > 0");
        assert!(
            capacity <= MAX_CAPACITY,
            "ByteStream capacity must be <= {MAX_CAPACITY}, got {capacity}"
        );

        let size = physical_size(capacity);
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(size)
            .map_err(|_| ByteStreamError::AllocationFailure { size })?;
        storage.resize(size, 0);

        Ok(Self {
            storage: storage.into_boxed_slice(),
            capacity,
            head: 0,
            tail: 0,
            used: 0,
            free: capacity,
        })
    }

    /// Shorthand for [`ByteStream::new`] with only a capacity.
    ///
    /// # Errors
    ///
    /// See [`ByteStream::new`].
    ///
    /// # Panics
    ///
    /// See [`ByteStream::new`].
    pub fn with_capacity(capacity: u32) -> Result<Self, ByteStreamError> {
        Self::new(ByteStreamOptions { capacity })
    }

    /// Returns the cached counters.
    #[must_use]
    pub fn status(&self) -> Status {
        Status {
            capacity: self.capacity,
            free: self.free,
            used: self.used,
        }
    }

    /// Logical capacity.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of buffered bytes.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.used
    }

    /// Number of bytes that can still be written.
    #[must_use]
    pub fn free(&self) -> u32 {
        self.free
    }

    /// `true` when nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// `true` when a write of any non-empty slice would fail.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free == 0
    }

    /// Length of the underlying storage array.
    #[must_use]
    pub fn physical_capacity(&self) -> usize {
        self.storage.len()
    }

    /// Appends all of `src`, or nothing.
    ///
    /// An empty `src` always succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ByteStreamError::InsufficientSpace`] if fewer than
    /// `src.len()` bytes are free. The stream is left untouched.
    pub fn write(&mut self, src: &[u8]) -> Result<(), ByteStreamError> {
        if src.is_empty() {
            return Ok(());
        }

        let size = saturating_u32(src.len());
        if self.free < size {
            return Err(ByteStreamError::InsufficientSpace {
                requested: src.len(),
                free: self.free,
            });
        }

        self.store(self.tail, src);
        self.tail = self.advance(self.tail, size);
        self.used += size;
        self.free -= size;

        debug_assert_eq!(self.used + self.free, self.capacity);
        Ok(())
    }

    /// Removes bytes from the front of the stream.
    ///
    /// With [`Destination::Buffer`] exactly `buf.len()` bytes are copied out;
    /// with [`Destination::Discard`] they are dropped. A zero-length request
    /// always succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ByteStreamError::InsufficientData`] if fewer bytes are
    /// buffered than requested. The stream is left untouched.
    pub fn read(&mut self, dst: Destination<'_>) -> Result<(), ByteStreamError> {
        let requested = dst.len();
        if requested == 0 {
            return Ok(());
        }

        let size = saturating_u32(requested);
        if self.used < size {
            return Err(ByteStreamError::InsufficientData {
                requested,
                available: self.used,
            });
        }

        if let Destination::Buffer(buf) = dst {
            self.load_front(buf);
        }
        self.consume(size);
        Ok(())
    }

    /// Drops `count` bytes from the front of the stream.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn skip(&mut self, count: u32) -> Result<(), ByteStreamError> {
        self.read(Destination::Discard(count))
    }

    /// Copies `dst.len()` bytes starting `offset` bytes past the front of the
    /// stream, without removing them.
    ///
    /// The offset is validated first: an offset at or past the number of
    /// buffered bytes is rejected even when `dst` is empty.
    ///
    /// # Errors
    ///
    /// - [`ByteStreamError::InvalidOffset`] if `offset >= len()`.
    /// - [`ByteStreamError::InsufficientData`] if `offset + dst.len() > len()`.
    pub fn peek(&self, dst: &mut [u8], offset: u32) -> Result<(), ByteStreamError> {
        if offset >= self.used {
            return Err(ByteStreamError::InvalidOffset {
                offset,
                used: self.used,
            });
        }

        if dst.is_empty() {
            return Ok(());
        }

        let available = self.used - offset;
        if saturating_u32(dst.len()) > available {
            return Err(ByteStreamError::InsufficientData {
                requested: dst.len(),
                available,
            });
        }

        self.load(self.advance(self.head, offset), dst);
        Ok(())
    }

    /// Forgets all buffered bytes. The storage is not zeroed.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.used = 0;
        self.free = self.capacity;
    }

    /// Returns the buffered bytes as up to two slices in logical order.
    ///
    /// The second slice is empty unless the buffered region wraps past the
    /// physical end of the storage.
    #[must_use]
    pub fn segments(&self) -> (&[u8], &[u8]) {
        let (first, second) = self.runs(self.head, self.used);
        (&self.storage[first], &self.storage[second])
    }

    /// Drops `size` bytes from the front. The caller has checked `size <= used`.
    pub(crate) fn consume(&mut self, size: u32) {
        debug_assert!(size <= self.used);
        self.head = self.advance(self.head, size);
        self.used -= size;
        self.free += size;
        debug_assert_eq!(self.used + self.free, self.capacity);
    }

    /// Copies the first `dst.len()` buffered bytes. The caller has checked
    /// `dst.len() <= used`.
    pub(crate) fn load_front(&self, dst: &mut [u8]) {
        self.load(self.head, dst);
    }

    /// Copies `dst.len()` bytes starting at physical index `origin`.
    fn load(&self, origin: u32, dst: &mut [u8]) {
        let (first, second) = self.runs(origin, saturating_u32(dst.len()));
        let split = first.len();
        dst[..split].copy_from_slice(&self.storage[first]);
        dst[split..].copy_from_slice(&self.storage[second]);
    }

    fn store(&mut self, origin: u32, src: &[u8]) {
        let (first, second) = self.runs(origin, saturating_u32(src.len()));
        let split = first.len();
        self.storage[first].copy_from_slice(&src[..split]);
        self.storage[second].copy_from_slice(&src[split..]);
    }

    /// Splits the logical run `[origin, origin + count)` at the physical end.
    fn runs(&self, origin: u32, count: u32) -> (Range<usize>, Range<usize>) {
        let physical = self.storage.len();
        let start = origin as usize;
        let count = count as usize;
        debug_assert!(start < physical, "origin {start} out of bounds");
        debug_assert!(count < physical, "run of {count} exceeds storage");

        let first = (physical - start).min(count);
        (start..start + first, 0..count - first)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn advance(&self, index: u32, n: u32) -> u32 {
        let physical = self.storage.len() as u64;
        // `physical` fits in a u32, so the remainder does too.
        ((u64::from(index) + u64::from(n)) % physical) as u32
    }

    /// Panics if any of the layout invariants is broken.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn check_invariants(&self) {
        assert!(self.used <= self.capacity, "used exceeds capacity: {self:?}");
        assert_eq!(self.used + self.free, self.capacity, "{self:?}");
        assert!((self.head as usize) < self.storage.len(), "{self:?}");
        assert!((self.tail as usize) < self.storage.len(), "{self:?}");
        assert_eq!(self.advance(self.head, self.used), self.tail, "{self:?}");
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, second) = self.segments();
        let mut contents = Vec::with_capacity(first.len() + second.len());
        contents.extend_from_slice(first);
        contents.extend_from_slice(second);

        f.debug_struct("ByteStream")
            .field("capacity", &self.capacity)
            .field("used", &self.used)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("contents", &contents.as_bstr())
            .finish()
    }
}

/// Storage length for a logical capacity: the next multiple of 8 strictly
/// above it.
pub(crate) fn physical_size(capacity: u32) -> usize {
    ((capacity as usize >> 3) + 1) << 3
}

/// Lengths past `u32::MAX` can never fit, so they compare as `u32::MAX`.
pub(crate) fn saturating_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
