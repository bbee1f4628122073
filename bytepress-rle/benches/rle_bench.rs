//! RLE throughput benchmarks.

use bytepress_rle::{compress, decompress};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

type PatternGenerator = fn(usize) -> Vec<u8>;

mod test_data {
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0x42; size]
    }

    /// Deterministic pseudo-random bytes.
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x0123_4567_89AB_CDEF;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 33) as u8);
        }
        data
    }

    /// Short runs of random length.
    pub fn runs(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 17;
        while data.len() < size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let len = ((seed >> 40) % 20 + 1) as usize;
            let byte = (seed >> 33) as u8;
            data.extend(std::iter::repeat_n(byte, len.min(size - data.len())));
        }
        data
    }
}

const SIZE: usize = 256 * 1024;

const PATTERNS: [(&str, PatternGenerator); 3] = [
    ("uniform", test_data::uniform as PatternGenerator),
    ("random", test_data::random as PatternGenerator),
    ("runs", test_data::runs as PatternGenerator),
];

fn bench_rle(c: &mut Criterion) {
    let mut group = c.benchmark_group("rle");
    group.throughput(Throughput::Bytes(SIZE as u64));

    for (pattern_name, generator) in PATTERNS {
        let data = generator(SIZE);
        let packed = compress(&data);

        group.bench_with_input(
            BenchmarkId::new("compress", pattern_name),
            &data,
            |b, data| b.iter(|| black_box(compress(black_box(data)))),
        );
        group.bench_with_input(
            BenchmarkId::new("decompress", pattern_name),
            &packed,
            |b, packed| b.iter(|| black_box(decompress(black_box(packed)).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_rle);
criterion_main!(benches);
