/// Snapshot of a stream's counters, as returned by
/// [`ByteStream::status`](crate::ByteStream::status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    /// Logical capacity requested at construction.
    pub capacity: u32,
    /// Bytes that can still be written.
    pub free: u32,
    /// Bytes currently buffered.
    pub used: u32,
}
