//! A fixed-capacity FIFO byte ring for decoupling bursty byte arrival (a serial
//! line, a socket) from a parser that consumes bytes or whole lines.
//!
//! ```rust
//! use bytestream::{ByteStream, Destination};
//!
//! let mut stream = ByteStream::with_capacity(16).unwrap();
//! stream.write(b"AB\r\nCD").unwrap();
//!
//! let mut line = [0u8; 8];
//! let len = stream.read_line(&mut line).unwrap();
//! assert_eq!(&line[..len as usize], b"AB\r\n");
//!
//! let mut rest = [0u8; 2];
//! stream.read(Destination::Buffer(&mut rest)).unwrap();
//! assert_eq!(&rest, b"CD");
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
#[cfg(feature = "std")]
mod io;
mod line;
mod options;
mod status;
mod stream;

#[cfg(test)]
mod tests;

pub use error::ByteStreamError;
pub use options::{ByteStreamOptions, DEFAULT_CAPACITY, MAX_CAPACITY};
pub use status::Status;
pub use stream::{ByteStream, Destination};
