// In byteplane-core/benches/split_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

// Import both kernel variants: the vectorized path and the scalar reference.
use byteplane::{decode, decode_scalar, encode, encode_scalar};

// --- Mock Data Generation ---

/// Fills a buffer with a rolling pattern; the transpose is content-oblivious,
/// so entropy does not matter here, only size.
fn generate_words(count: usize) -> Vec<u64> {
    (0..count)
        .map(|i| (i as u64).wrapping_mul(0x0101_0101_0101_0101))
        .collect()
}

// --- Benchmark Suite ---

const BENCH_DATA_SIZE: usize = 1 << 20; // 1 MiB

fn bench_split_kernels(c: &mut Criterion) {
    // --- Setup Data ---
    let words = generate_words(BENCH_DATA_SIZE / 8);
    let raw: &[u8] = bytemuck::cast_slice(&words);
    let floats: &[f32] = bytemuck::cast_slice(&words);
    let doubles: &[f64] = bytemuck::cast_slice(&words);

    // Prepare encoded data once so the decode benchmarks measure decoding only.
    let mut planes_f32 = Vec::new();
    let mut planes_f64 = Vec::new();
    encode(floats, &mut planes_f32).unwrap();
    encode(doubles, &mut planes_f64).unwrap();

    let mut out = Vec::with_capacity(BENCH_DATA_SIZE);

    // --- Create a Benchmark Group ---
    let mut group = c.benchmark_group("Split Kernels Comparison");
    group.throughput(criterion::Throughput::Bytes(BENCH_DATA_SIZE as u64));

    // A memcpy-shaped baseline to put the transpose numbers in context.
    group.bench_function("Baseline copy", |b| {
        b.iter(|| {
            out.clear();
            out.extend_from_slice(black_box(raw));
        })
    });

    // --- Encoding Benchmarks ---
    group.bench_function("Encode f32 scalar", |b| {
        b.iter(|| encode_scalar(black_box(floats), &mut out))
    });
    group.bench_function("Encode f32 unpack", |b| {
        b.iter(|| encode(black_box(floats), &mut out))
    });
    group.bench_function("Encode f64 scalar", |b| {
        b.iter(|| encode_scalar(black_box(doubles), &mut out))
    });
    group.bench_function("Encode f64 unpack", |b| {
        b.iter(|| encode(black_box(doubles), &mut out))
    });

    // --- Decoding Benchmarks ---
    group.bench_function("Decode f32 scalar", |b| {
        b.iter(|| decode_scalar::<f32>(black_box(&planes_f32), &mut out))
    });
    group.bench_function("Decode f32 unpack", |b| {
        b.iter(|| decode::<f32>(black_box(&planes_f32), &mut out))
    });
    group.bench_function("Decode f64 scalar", |b| {
        b.iter(|| decode_scalar::<f64>(black_box(&planes_f64), &mut out))
    });
    group.bench_function("Decode f64 unpack", |b| {
        b.iter(|| decode::<f64>(black_box(&planes_f64), &mut out))
    });

    group.finish();
}

criterion_group!(benches, bench_split_kernels);
criterion_main!(benches);
