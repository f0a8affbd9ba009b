use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffzip::{compress_str, decompress};
use rand::distributions::WeightedIndex;
use rand::prelude::*;

const ALPHABET: &[char] = &[
    'e', 't', 'a', 'o', 'i', 'n', ' ', 's', 'h', 'r', 'd', 'l', 'u', '\n', 'é', 'ß',
];

fn generate_text(len: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights: Vec<u32> = (1..=ALPHABET.len() as u32).rev().map(|w| w * w).collect();
    let dist = WeightedIndex::new(&weights).unwrap();
    (0..len).map(|_| ALPHABET[dist.sample(&mut rng)]).collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_compress");
    for size in [1_000, 10_000, 100_000] {
        let text = generate_text(size, 42);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| compress_str(black_box(text)).unwrap())
        });
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_decompress");
    for size in [1_000, 10_000, 100_000] {
        let text = generate_text(size, 42);
        let archive = compress_str(&text).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &archive, |b, archive| {
            b.iter(|| decompress(black_box(archive)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
