use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flashcards_core::cards::CardSet;
use flashcards_core::mistakes::MistakeCounts;
use flashcards_core::quiz::{grade, Quiz};
use flashcards_core::snapshot::Snapshot;

fn make_cards(n: usize) -> CardSet {
    (0..n)
        .map(|i| (format!("term-{i}"), format!("definition-{i}")))
        .collect()
}

fn make_mistakes(n: usize) -> MistakeCounts {
    (0..n)
        .map(|i| (format!("term-{i}"), (i % 17) as u32))
        .collect()
}

fn bench_hardest(c: &mut Criterion) {
    let mut group = c.benchmark_group("hardest");

    for n in [100, 10_000] {
        let mistakes = make_mistakes(n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| black_box(&mistakes).hardest())
        });
    }

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let base = make_cards(1_000);
    let incoming = make_cards(2_000);

    c.bench_function("merge 2000 into 1000", |b| {
        b.iter(|| {
            let mut cards = base.clone();
            cards.merge(black_box(incoming.clone()))
        })
    });
}

fn bench_quiz_round(c: &mut Criterion) {
    let cards = make_cards(1_000);
    let mut quiz = Quiz::seeded(7);

    c.bench_function("draw and grade", |b| {
        b.iter(|| {
            let card = quiz.draw(&cards).unwrap();
            grade(&cards, &card, black_box("definition-500"))
        })
    });
}

fn bench_snapshot_parse(c: &mut Criterion) {
    let snapshot = Snapshot::capture(&make_cards(1_000), &make_mistakes(1_000));
    let json = serde_json::to_string(&snapshot).unwrap();
    let path = std::path::Path::new("bench.json");

    c.bench_function("parse snapshot 1000", |b| {
        b.iter(|| Snapshot::parse(black_box(json.as_bytes()), path).unwrap())
    });
}

criterion_group!(
    benches,
    bench_hardest,
    bench_merge,
    bench_quiz_round,
    bench_snapshot_parse
);
criterion_main!(benches);
