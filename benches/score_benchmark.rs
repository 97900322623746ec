use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fuzzypass::metric::calculate_predictability;
use fuzzypass::{Corpus, Scorer};

fn bench_score(c: &mut Criterion) {
    let corpus = Arc::new(Corpus::embedded().unwrap());
    let scorer = Scorer::new(Arc::clone(&corpus)).unwrap();

    c.bench_function("score_short", |b| b.iter(|| scorer.score(black_box("hunter2"))));
    c.bench_function("score_long", |b| {
        b.iter(|| scorer.score(black_box("correct horse battery staple")))
    });
    c.bench_function("predictability_embedded_corpus", |b| {
        b.iter(|| calculate_predictability(black_box("Tr0ub4dor&3"), &corpus))
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_scorer", |b| {
        b.iter(|| Scorer::new(Arc::new(Corpus::embedded().unwrap())))
    });
}

criterion_group!(benches, bench_score, bench_build);
criterion_main!(benches);
