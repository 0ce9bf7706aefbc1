use thiserror::Error;

/// Errors reported by [`ByteStream`](crate::ByteStream) operations.
///
/// Every error is returned before any state is touched: after a failed call the
/// stream's indices and counters are exactly what they were before it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteStreamError {
    /// The storage array could not be allocated.
    #[error("failed to allocate {size} bytes of storage")]
    AllocationFailure {
        /// Physical size of the storage that was requested.
        size: usize,
    },
    /// A write asked for more room than is free.
    #[error("insufficient space: {requested} bytes requested, {free} free")]
    InsufficientSpace {
        /// Number of bytes the caller tried to write.
        requested: usize,
        /// Free bytes at the time of the call.
        free: u32,
    },
    /// A read or peek asked for more bytes than are buffered.
    #[error("insufficient data: {requested} bytes requested, {available} available")]
    InsufficientData {
        /// Number of bytes the caller asked for.
        requested: usize,
        /// Bytes available from the requested offset.
        available: u32,
    },
    /// A peek offset does not address a buffered byte.
    #[error("invalid offset {offset}: only {used} bytes buffered")]
    InvalidOffset {
        /// The rejected offset.
        offset: u32,
        /// Buffered bytes at the time of the call.
        used: u32,
    },
    /// No CR, LF or CRLF terminator among the buffered bytes.
    #[error("no end-of-line sequence in buffered data")]
    NoEol,
    /// The destination cannot hold the next line.
    ///
    /// A zero-capacity destination is always rejected, even when no complete
    /// line is buffered yet; `required` is then `1`.
    #[error("destination of {capacity} bytes is too small, {required} required")]
    BufferTooSmall {
        /// Length of the next line including its terminator.
        required: u32,
        /// Capacity the caller offered.
        capacity: usize,
    },
}
