//! Line extraction on top of the ring.
//!
//! A line ends at the first LF, CRLF, or lone CR in logical order. The buffered
//! region is scanned as the two physical segments returned by
//! [`ByteStream::segments`]. Each segment is scanned on its own; the only rule
//! that joins them is a CR ending the first segment followed by an LF opening
//! the second, which forms a single CRLF terminator across the wrap.
//!
//! A CR that is the last buffered byte terminates a CR-only line even if its
//! LF has not arrived yet.

use alloc::vec::Vec;

use crate::{ByteStream, ByteStreamError, stream::saturating_u32};

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// The terminator that ended a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Eol {
    Lf,
    Cr,
    CrLf,
}

/// A line located at the front of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineSpan {
    /// Length including the terminator.
    pub(crate) len: u32,
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) eol: Eol,
}

enum SegmentScan {
    /// Terminator found; `end` is one past its last byte.
    Found { end: usize, eol: Eol },
    /// The first terminator byte is a CR in the segment's last position.
    TrailingCr,
    Missing,
}

fn scan_segment(segment: &[u8]) -> SegmentScan {
    let Some(pos) = segment.iter().position(|&b| b == CR || b == LF) else {
        return SegmentScan::Missing;
    };

    if segment[pos] == LF {
        return SegmentScan::Found {
            end: pos + 1,
            eol: Eol::Lf,
        };
    }

    match segment.get(pos + 1) {
        Some(&LF) => SegmentScan::Found {
            end: pos + 2,
            eol: Eol::CrLf,
        },
        Some(_) => SegmentScan::Found {
            end: pos + 1,
            eol: Eol::Cr,
        },
        None => SegmentScan::TrailingCr,
    }
}

impl ByteStream {
    /// Locates the first complete line without touching the stream.
    pub(crate) fn find_line(&self) -> Result<LineSpan, ByteStreamError> {
        let (first, second) = self.segments();

        let (end, eol) = match scan_segment(first) {
            SegmentScan::Found { end, eol } => (end, eol),
            SegmentScan::TrailingCr if second.first() == Some(&LF) => {
                (first.len() + 1, Eol::CrLf)
            }
            SegmentScan::TrailingCr => (first.len(), Eol::Cr),
            SegmentScan::Missing => match scan_segment(second) {
                SegmentScan::Found { end, eol } => (first.len() + end, eol),
                SegmentScan::TrailingCr => (first.len() + second.len(), Eol::Cr),
                SegmentScan::Missing => return Err(ByteStreamError::NoEol),
            },
        };

        debug_assert!(end <= self.len() as usize);
        Ok(LineSpan {
            len: saturating_u32(end),
            eol,
        })
    }

    /// Finds the first line and checks it fits in `capacity` bytes.
    fn fit_line(&self, capacity: usize) -> Result<LineSpan, ByteStreamError> {
        if capacity == 0 {
            let required = self.find_line().map_or(1, |line| line.len);
            return Err(ByteStreamError::BufferTooSmall {
                required,
                capacity,
            });
        }

        let line = self.find_line()?;
        if line.len as usize > capacity {
            return Err(ByteStreamError::BufferTooSmall {
                required: line.len,
                capacity,
            });
        }
        Ok(line)
    }

    /// Removes the first line, terminator included, copying it into the front
    /// of `dst`. Returns the line length.
    ///
    /// ```rust
    /// use bytestream::ByteStream;
    ///
    /// let mut stream = ByteStream::with_capacity(32).unwrap();
    /// stream.write(b"OK\rREADY\n").unwrap();
    ///
    /// let mut line = [0u8; 16];
    /// assert_eq!(stream.read_line(&mut line).unwrap(), 3);
    /// assert_eq!(&line[..3], b"OK\r");
    /// assert_eq!(stream.read_line(&mut line).unwrap(), 6);
    /// assert_eq!(&line[..6], b"READY\n");
    /// ```
    ///
    /// # Errors
    ///
    /// - [`ByteStreamError::BufferTooSmall`] if `dst` is empty or shorter than
    ///   the line.
    /// - [`ByteStreamError::NoEol`] if no complete line is buffered.
    ///
    /// The stream is left untouched on error.
    pub fn read_line(&mut self, dst: &mut [u8]) -> Result<u32, ByteStreamError> {
        let line = self.fit_line(dst.len())?;
        self.load_front(&mut dst[..line.len as usize]);
        self.consume(line.len);
        Ok(line.len)
    }

    /// Reports the length of the first line, terminator included, without
    /// removing it.
    ///
    /// `capacity` plays the role of a destination size: lines longer than it
    /// are reported as [`ByteStreamError::BufferTooSmall`], so a caller can
    /// learn how large a buffer to offer [`read_line`](Self::read_line). Pass
    /// `u32::MAX` to learn the length unconditionally.
    ///
    /// # Errors
    ///
    /// Same as [`read_line`](Self::read_line).
    pub fn peek_line(&self, capacity: u32) -> Result<u32, ByteStreamError> {
        self.fit_line(capacity as usize).map(|line| line.len)
    }

    /// Removes the first line, terminator included, appending it to `out`.
    /// Returns the line length.
    ///
    /// # Errors
    ///
    /// Returns [`ByteStreamError::NoEol`] if no complete line is buffered;
    /// `out` and the stream are left untouched.
    pub fn read_line_to_vec(&mut self, out: &mut Vec<u8>) -> Result<u32, ByteStreamError> {
        let line = self.find_line()?;
        let start = out.len();
        out.resize(start + line.len as usize, 0);
        self.load_front(&mut out[start..]);
        self.consume(line.len);
        Ok(line.len)
    }
}
