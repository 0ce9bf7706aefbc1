use alloc::vec::Vec;

use crate::{ByteStream, Destination};

/// Capacity 10 pads to 16 bytes of storage.
fn advanced_stream() -> ByteStream {
    let mut stream = ByteStream::with_capacity(10).unwrap();
    assert_eq!(stream.physical_capacity(), 16);
    stream.write(b"ABCDEFGH").unwrap();
    stream.skip(8).unwrap();
    stream
}

#[test]
fn write_ending_at_physical_end() {
    let mut stream = advanced_stream();
    stream.write(b"12345678").unwrap();
    assert_eq!(stream.segments(), (&b"12345678"[..], &b""[..]));
    stream.check_invariants();

    let mut out = [0u8; 8];
    stream.read(Destination::Buffer(&mut out)).unwrap();
    assert_eq!(&out, b"12345678");
    stream.check_invariants();
}

#[test]
fn write_crossing_physical_end_reads_back() {
    let mut stream = advanced_stream();
    stream.write(b"0123456789").unwrap();
    assert!(stream.is_full());
    assert_eq!(stream.segments(), (&b"01234567"[..], &b"89"[..]));
    stream.check_invariants();

    let mut out = [0u8; 10];
    stream.read(Destination::Buffer(&mut out)).unwrap();
    assert_eq!(&out, b"0123456789");
    stream.check_invariants();
}

#[test]
fn peek_across_the_wrap() {
    let mut stream = advanced_stream();
    stream.write(b"0123456789").unwrap();

    let mut out = [0u8; 4];
    stream.peek(&mut out, 6).unwrap();
    assert_eq!(&out, b"6789");

    let mut out = [0u8; 1];
    stream.peek(&mut out, 9).unwrap();
    assert_eq!(&out, b"9");
    assert_eq!(stream.len(), 10);
}

#[test]
fn discard_across_the_wrap() {
    let mut stream = advanced_stream();
    stream.write(b"0123456789").unwrap();
    stream.skip(9).unwrap();
    assert_eq!(stream.segments(), (&b"9"[..], &b""[..]));
    stream.check_invariants();
}

#[test]
fn repeated_cycles_keep_order() {
    let mut stream = ByteStream::with_capacity(5).unwrap();
    let mut expected = Vec::new();
    let mut seen = Vec::new();

    for round in 0u8..100 {
        let chunk = [round, round.wrapping_add(1), round.wrapping_add(2)];
        stream.write(&chunk).unwrap();
        expected.extend_from_slice(&chunk);

        let mut out = [0u8; 3];
        stream.read(Destination::Buffer(&mut out)).unwrap();
        seen.extend_from_slice(&out);
        stream.check_invariants();
    }

    assert_eq!(seen, expected);
}
