//! Transcoding and chunk encoding benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;
use uefappend_bench::{random_data, random_tap};
use uefappend_codec::{ByteWriter, ChecksumBuffer, ChunkEncoder};
use uefappend_core::{Config, ContainerSession};
use uefappend_storage::InMemoryBackend;

/// Benchmark the running checksum over block-sized inputs.
fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");

    for size in [16, 256].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let data = random_data(size);
            b.iter(|| {
                let mut buf = ChecksumBuffer::with_capacity(size + 1);
                buf.write_bytes(black_box(&data));
                black_box(buf.into_bytes_with_checksum());
            });
        });
    }

    group.finish();
}

/// Benchmark data chunk emission into memory.
fn bench_data_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("data_chunk");
    let data = random_data(257);
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("block_257", |b| {
        let mut encoder = ChunkEncoder::new(ByteWriter::new(InMemoryBackend::new()));
        b.iter(|| {
            encoder.write_data(black_box(&data)).unwrap();
        });
    });

    group.finish();
}

/// Benchmark whole-stream transcoding into memory.
fn bench_transcode_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcode_memory");

    for size in [256, 4096, 32768].iter() {
        let tap = random_tap(4, *size);
        group.throughput(Throughput::Bytes(tap.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tap, |b, tap| {
            b.iter(|| {
                let mut session =
                    ContainerSession::with_backend(InMemoryBackend::new(), Config::default())
                        .unwrap();
                let summary = session.append_reader(black_box(tap.as_slice())).unwrap();
                black_box(summary);
            });
        });
    }

    group.finish();
}

/// Benchmark appending a file to a container on disk.
fn bench_append_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_file");
    group.sample_size(20);

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.tap");
    std::fs::write(&input, random_tap(8, 8192)).unwrap();
    let target = dir.path().join("bench.uef");

    group.bench_function("tap_8x8k", |b| {
        b.iter(|| {
            let _ = std::fs::remove_file(&target);
            let mut session = ContainerSession::open(&target, Config::default()).unwrap();
            session.ensure_header().unwrap();
            black_box(session.append_file(&input).unwrap());
            session.finish().unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_checksum,
    bench_data_chunk,
    bench_transcode_memory,
    bench_append_file,
);
criterion_main!(benches);
