//! Decode throughput benchmarks.
//!
//! Measures streaming decompression speed for both codecs across data
//! patterns and output window sizes.

use bzip2::write::BzEncoder;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flate2::write::GzEncoder;
use sluice_core::{Method, OutputChunk, Result};
use sluice_decode::{DecoderConfig, StreamDecoder};
use std::hint::black_box;
use std::io::Write;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - all bytes are the same (best ratio)
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - no patterns (worst ratio)
    pub fn random(size: usize) -> Vec<u8> {
        // Simple PRNG for reproducible random data
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - realistic scenario
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }
}

fn compress(method: Method, data: &[u8]) -> Vec<u8> {
    match method {
        Method::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        Method::Bzip2 => {
            let mut encoder = BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
    }
}

fn drain(config: DecoderConfig, payload: &[u8]) -> u64 {
    let mut decoder = StreamDecoder::open(config).unwrap();
    let mut sink = |chunk: OutputChunk| -> Result<()> {
        black_box(chunk.data());
        Ok(())
    };
    decoder.process(payload, &mut sink).unwrap();
    decoder.total_out()
}

/// Benchmark decode speed for different data patterns
fn bench_decode_data_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_data_types");

    type PatternGenerator = fn(usize) -> Vec<u8>;
    let patterns: [(&str, PatternGenerator); 3] = [
        ("uniform", test_data::uniform as PatternGenerator),
        ("random", test_data::random as PatternGenerator),
        ("text", test_data::text_like as PatternGenerator),
    ];

    let size = 256 * 1024;

    for method in Method::ALL {
        for (pattern_name, generator) in patterns {
            let payload = compress(method, &generator(size));

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(method.name(), pattern_name),
                &payload,
                |b, payload| {
                    b.iter(|| {
                        let produced = drain(DecoderConfig::new(method), black_box(payload));
                        black_box(produced);
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the window size impact on drain overhead
fn bench_window_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_sizes");

    let size = 256 * 1024;
    let data = test_data::text_like(size);

    for method in Method::ALL {
        let payload = compress(method, &data);

        for window in [1024, 16 * 1024, 256 * 1024] {
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(method.name(), format!("{}k", window / 1024)),
                &payload,
                |b, payload| {
                    b.iter(|| {
                        let config = DecoderConfig::new(method).with_window_size(window);
                        let produced = drain(config, black_box(payload));
                        black_box(produced);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_decode_data_types, bench_window_sizes);
criterion_main!(benches);
