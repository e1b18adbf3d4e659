//! Benchmarks for draft reconstruction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use draft_eval::draft::PackReconstructor;

fn synthetic_tokens(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("card{:04}", i)).collect()
}

fn reconstruct_single_draft_benchmark(c: &mut Criterion) {
    let reconstructor = PackReconstructor::default();
    let tokens = synthetic_tokens(360);

    c.bench_function("reconstruct_single_draft", |b| {
        b.iter(|| reconstructor.reconstruct(black_box(&tokens)))
    });
}

fn reconstruct_corpus_benchmark(c: &mut Criterion) {
    let reconstructor = PackReconstructor::default();
    let row = {
        let mut line = String::from("1,M19,");
        line.push_str(&synthetic_tokens(360).join(","));
        line
    };
    let corpus_text: String = (0..100)
        .map(|_| row.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    c.bench_function("reconstruct_100_draft_corpus", |b| {
        b.iter(|| reconstructor.parse_corpus(black_box(&corpus_text)))
    });
}

criterion_group!(
    benches,
    reconstruct_single_draft_benchmark,
    reconstruct_corpus_benchmark
);
criterion_main!(benches);
