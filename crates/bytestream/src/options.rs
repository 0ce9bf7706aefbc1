/// Capacity used when the caller does not choose one.
pub const DEFAULT_CAPACITY: u32 = 1024;

/// Largest accepted capacity; the padded physical size must still fit in a
/// `u32`.
pub const MAX_CAPACITY: u32 = u32::MAX - 8;

/// Configuration for a [`ByteStream`](crate::ByteStream).
///
/// # Examples
///
/// ```rust
/// use bytestream::{ByteStream, ByteStreamOptions};
///
/// let stream = ByteStream::new(ByteStreamOptions { capacity: 64 }).unwrap();
/// assert_eq!(stream.capacity(), 64);
///
/// let stream = ByteStream::new(ByteStreamOptions::default()).unwrap();
/// assert_eq!(stream.capacity(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ByteStreamOptions {
    /// Maximum number of bytes the stream holds at once.
    ///
    /// Must be in `1..=MAX_CAPACITY`. The storage array is padded to the next
    /// multiple of eight strictly above this value.
    ///
    /// # Default
    ///
    /// `1024`
    pub capacity: u32,
}

impl Default for ByteStreamOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
