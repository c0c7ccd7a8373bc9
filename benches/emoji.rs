//! Benchmarks for emoji lookup and search.

use chatmark::emoji::EmojiIndex;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_resolve(c: &mut Criterion) {
    let index = EmojiIndex::bundled();
    c.bench_function("emoji_resolve", |b| {
        b.iter(|| index.resolve(black_box("thumbsup_tone3")))
    });
}

fn bench_search(c: &mut Criterion) {
    let index = EmojiIndex::bundled();
    c.bench_function("emoji_search", |b| {
        b.iter(|| index.search(black_box("sm"), black_box(8)))
    });
}

criterion_group!(benches, bench_resolve, bench_search);
criterion_main!(benches);
