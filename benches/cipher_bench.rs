// In kaoscipher-core/benches/cipher_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array3;

use kaoscipher::{CipherConfig, Image};

/// Generates a deterministic gradient image so runs are comparable.
fn generate_image(h: usize, w: usize, c: usize) -> Image {
    Array3::from_shape_fn((h, w, c), |(i, j, k)| (i * 31 + j * 7 + k * 13) as u8)
}

// --- Benchmark Suite ---

const BENCH_SIDE: usize = 64;
const BENCH_CHANNELS: usize = 3;

fn bench_cipher_passes(c: &mut Criterion) {
    // --- Setup Data ---
    let image = generate_image(BENCH_SIDE, BENCH_SIDE, BENCH_CHANNELS);
    let pixels = (BENCH_SIDE * BENCH_SIDE * BENCH_CHANNELS) as u64;

    // Prepare a cipher image once so decryption is benchmarked in isolation.
    let mut setup = CipherConfig::classic(5, 3, 3, 0.8).build().unwrap();
    let cipher_image = setup.encrypt(&image).unwrap();

    let mut group = c.benchmark_group("Classic Chaos Pipeline");
    group.throughput(criterion::Throughput::Bytes(pixels));

    group.bench_function("Encrypt (64x64x3)", |b| {
        let mut en = CipherConfig::classic(5, 3, 3, 0.8).build().unwrap();
        b.iter(|| black_box(en.encrypt(black_box(&image)).unwrap()))
    });

    group.bench_function("Decrypt (64x64x3)", |b| {
        let mut en = CipherConfig::classic(5, 3, 3, 0.8).build().unwrap();
        b.iter(|| black_box(en.decrypt(black_box(&cipher_image)).unwrap()))
    });

    group.bench_function("Round Trip (64x64x3)", |b| {
        let mut en = CipherConfig::classic(5, 3, 3, 0.8).build().unwrap();
        b.iter(|| {
            let encrypted = en.encrypt(black_box(&image)).unwrap();
            black_box(en.decrypt(&encrypted).unwrap())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_cipher_passes);
criterion_main!(benches);
