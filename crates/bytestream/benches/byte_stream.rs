//! Benchmark – `bytestream::ByteStream`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use bytestream::{ByteStream, ByteStreamError, Destination};

const CAPACITY: u32 = 4096;

/// Deterministic CRLF-terminated lines of `line_len` bytes (terminator
/// included), `total` bytes overall.
fn make_lines(total: usize, line_len: usize) -> Vec<u8> {
    assert!(line_len >= 3, "line_len must leave room for payload and CRLF");
    let mut out = Vec::with_capacity(total);
    while out.len() + line_len <= total {
        out.extend((0..line_len - 2).map(|i| b'a' + (i % 26) as u8));
        out.extend_from_slice(b"\r\n");
    }
    out
}

/// Writes `payload` in `chunk`-sized bursts and reads each burst back,
/// wrapping the ring many times.
fn run_write_read(stream: &mut ByteStream, payload: &[u8], chunk: usize, out: &mut [u8]) -> usize {
    let mut moved = 0;
    for piece in payload.chunks(chunk) {
        stream.write(piece).unwrap();
        stream.read(Destination::Buffer(&mut out[..piece.len()])).unwrap();
        moved += piece.len();
    }
    moved
}

/// Writes `payload` in `chunk`-sized bursts and drains complete lines after
/// each burst. Returns the number of lines.
fn run_lines(stream: &mut ByteStream, payload: &[u8], chunk: usize) -> usize {
    let mut line = [0u8; 256];
    let mut lines = 0;
    for piece in payload.chunks(chunk) {
        stream.write(piece).unwrap();
        loop {
            match stream.read_line(&mut line) {
                Ok(_) => lines += 1,
                Err(ByteStreamError::NoEol) => break,
                Err(err) => panic!("{err}"),
            }
        }
    }
    lines
}

fn bench_write_read(c: &mut Criterion) {
    let payload = make_lines(1 << 20, 64);
    let mut out = vec![0u8; CAPACITY as usize];

    let mut group = c.benchmark_group("write_read");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    for &chunk in &[16usize, 256, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            let mut stream = ByteStream::with_capacity(CAPACITY).unwrap();
            b.iter(|| black_box(run_write_read(&mut stream, black_box(&payload), chunk, &mut out)));
        });
    }
    group.finish();
}

fn bench_read_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_line");
    for &line_len in &[16usize, 80, 250] {
        let payload = make_lines(1 << 20, line_len);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("line_len", line_len),
            &payload,
            |b, payload| {
                let mut stream = ByteStream::with_capacity(CAPACITY).unwrap();
                b.iter(|| black_box(run_lines(&mut stream, black_box(payload), 1024)));
            },
        );
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_write_read, bench_read_line }
criterion_main!(benches);
