//! `std::io` adapters.
//!
//! Unlike [`ByteStream::write`] and [`ByteStream::read`], these transfer as
//! many bytes as currently fit or are available, so a stream can be filled
//! straight from a serial port or socket with `io::copy`-style loops. A full
//! stream accepts `Ok(0)` bytes and an empty stream yields `Ok(0)`.

use std::io;

use crate::{ByteStream, Destination};

impl io::Write for ByteStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.free() as usize);
        ByteStream::write(self, &buf[..n]).map_err(io::Error::other)?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.len() as usize);
        ByteStream::read(self, Destination::Buffer(&mut buf[..n])).map_err(io::Error::other)?;
        Ok(n)
    }
}
