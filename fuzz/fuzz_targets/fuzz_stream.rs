#![no_main]
use std::collections::VecDeque;

use arbitrary::Arbitrary;
use bytestream::{ByteStream, ByteStreamError, Destination};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Write(Vec<u8>),
    Read(u16),
    Skip(u16),
    Peek { offset: u16, size: u16 },
    ReadLine(u16),
    PeekLine(u16),
    ReadLineToVec,
    Clear,
}

#[derive(Arbitrary, Debug)]
struct Input {
    capacity: u16,
    ops: Vec<Op>,
}

/// Length of the first line in the contiguous model, terminator included.
fn model_line(model: &VecDeque<u8>) -> Option<usize> {
    let pos = model.iter().position(|&b| b == b'\r' || b == b'\n')?;
    if model[pos] == b'\r' && model.get(pos + 1) == Some(&b'\n') {
        Some(pos + 2)
    } else {
        Some(pos + 1)
    }
}

fn run(input: Input) {
    let capacity = u32::from(input.capacity) + 1;
    let mut stream = ByteStream::with_capacity(capacity).expect("small allocation");
    let mut model: VecDeque<u8> = VecDeque::new();

    for op in input.ops {
        match op {
            Op::Write(data) => {
                let fits = data.len() <= capacity as usize - model.len();
                assert_eq!(stream.write(&data).is_ok(), fits);
                if fits {
                    model.extend(&data);
                }
            }
            Op::Read(size) => {
                let mut out = vec![0u8; size.into()];
                let ok = stream.read(Destination::Buffer(&mut out)).is_ok();
                assert_eq!(ok, usize::from(size) <= model.len());
                if ok {
                    assert!(model.drain(..usize::from(size)).eq(out));
                }
            }
            Op::Skip(size) => {
                let ok = stream.skip(size.into()).is_ok();
                assert_eq!(ok, usize::from(size) <= model.len());
                if ok {
                    model.drain(..usize::from(size));
                }
            }
            Op::Peek { offset, size } => {
                let before = stream.status();
                let mut out = vec![0u8; size.into()];
                let (offset, size) = (usize::from(offset), usize::from(size));
                match stream.peek(&mut out, offset as u32) {
                    Ok(()) => {
                        assert!(offset + size <= model.len());
                        assert!(model.range(offset..offset + size).eq(out.iter()));
                    }
                    Err(ByteStreamError::InvalidOffset { .. }) => assert!(offset >= model.len()),
                    Err(ByteStreamError::InsufficientData { .. }) => {
                        assert!(offset < model.len() && offset + size > model.len());
                    }
                    Err(err) => panic!("unexpected peek error: {err}"),
                }
                assert_eq!(stream.status(), before);
            }
            Op::ReadLine(dst_len) => {
                let mut out = vec![0u8; dst_len.into()];
                match (stream.read_line(&mut out), model_line(&model)) {
                    (Ok(len), Some(expected)) => {
                        assert_eq!(len as usize, expected);
                        assert!(model.drain(..expected).eq(out[..expected].iter().copied()));
                    }
                    (Err(ByteStreamError::NoEol), None) => assert_ne!(dst_len, 0),
                    (Err(ByteStreamError::BufferTooSmall { required, .. }), line) => {
                        assert_eq!(required as usize, line.unwrap_or(1));
                    }
                    (result, line) => panic!("read_line {result:?} vs model {line:?}"),
                }
            }
            Op::PeekLine(limit) => {
                let before = stream.status();
                match (stream.peek_line(limit.into()), model_line(&model)) {
                    (Ok(len), Some(expected)) => assert_eq!(len as usize, expected),
                    (Err(ByteStreamError::NoEol), None) => {}
                    (Err(ByteStreamError::BufferTooSmall { required, .. }), line) => {
                        assert_eq!(required as usize, line.unwrap_or(1));
                    }
                    (result, line) => panic!("peek_line {result:?} vs model {line:?}"),
                }
                assert_eq!(stream.status(), before);
            }
            Op::ReadLineToVec => {
                let mut out = Vec::new();
                match model_line(&model) {
                    Some(expected) => {
                        assert_eq!(stream.read_line_to_vec(&mut out), Ok(expected as u32));
                        assert!(model.drain(..expected).eq(out));
                    }
                    None => {
                        assert_eq!(stream.read_line_to_vec(&mut out), Err(ByteStreamError::NoEol));
                    }
                }
            }
            Op::Clear => {
                stream.clear();
                model.clear();
            }
        }

        stream.check_invariants();
        let (first, second) = stream.segments();
        assert!(first.iter().chain(second).eq(model.iter()));
    }
}

fuzz_target!(|input: Input| run(input));
