#![allow(missing_docs, dead_code)]

use std::fmt::Write;

use bstr::ByteSlice;
use bytestream::{ByteStream, ByteStreamError};

// A modem session as it arrives over a UART: bursts end wherever the driver's
// FIFO happened to drain, including between a CR and its LF.
#[rustfmt::skip]
pub const TRANSCRIPT: [&[u8]; 7] = [
    b"AT\r",                 // CR is the last buffered byte
    b"\nOK\r\n+CSQ: 2",      // LF left over from the split CRLF; partial reply
    b"1,99\r",               // reply completes, its LF still in flight
    b"\n\r\nOK",             // LF, an empty CRLF line, partial OK
    b"\r\n",
    b"RING\n",               // LF-only line
    b"RING\rBUSY\r\n",       // CR-only line followed by a CRLF line
];

/// Split `payload` into `parts` approximately equal chunks.
///
/// # Panics
///
/// Panics if `parts` is zero.
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Feeds every chunk into a fresh stream, pulling out complete lines after
/// each one, and renders the lines followed by the final status.
pub fn render_lines(capacity: u32, chunks: &[&[u8]], drain_each_chunk: bool) -> String {
    let mut stream = ByteStream::with_capacity(capacity).expect("allocation");
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        stream.write(chunk).expect("chunk fits");
        if drain_each_chunk || i + 1 == chunks.len() {
            drain_lines(&mut stream, &mut out);
        }
    }
    writeln!(out, "rest: {:?}", stream.status()).unwrap();
    out
}

fn drain_lines(stream: &mut ByteStream, out: &mut String) {
    loop {
        let mut line = Vec::new();
        match stream.read_line_to_vec(&mut line) {
            Ok(_) => writeln!(out, "{:?}", line.as_bstr()).unwrap(),
            Err(ByteStreamError::NoEol) => break,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
}
