//! Microbenchmarks that isolate the scoring kernel from indexing and
//! I/O.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use sift::score::alphabet::AlphabetMap;
use sift::score::llcs::score_single;
use sift::score::pack::pack_tokens;
use sift::score::packed::score_pack;
use sift::{SearchEngine, SearchOptions, Searchable};

const ADJECTIVES: &[&str] = &[
    "ancient", "modern", "practical", "complete", "visual", "hidden", "essential", "little", "great", "broken",
];
const NOUNS: &[&str] = &[
    "history", "guide", "garden", "kitchen", "universe", "painting", "language", "machine", "journey", "library",
];
const QUALIFIERS: &[&str] = &[
    "of europe", "for beginners", "in winter", "at night", "of the mind", "for experts", "in pictures", "of iron",
    "for children", "by hand",
];

fn corpus() -> Vec<String> {
    let mut lines = Vec::with_capacity(1000);
    for adj in ADJECTIVES {
        for noun in NOUNS {
            for qual in QUALIFIERS {
                lines.push(format!("the {adj} {noun} {qual}"));
            }
        }
    }
    lines
}

fn bench_single_token(c: &mut Criterion) {
    let opts = SearchOptions::default();
    let lines = corpus();
    let map = AlphabetMap::build("painting");

    c.bench_function("score_single", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for line in &lines {
                for token in line.split(' ') {
                    total += score_single("painting", token, &map, &opts);
                }
            }
            total
        });
    });
}

fn bench_packed(c: &mut Criterion) {
    let opts = SearchOptions::default();
    let lines = corpus();
    let tokens: Vec<String> = ["practical", "garden", "guide"].iter().map(|s| s.to_string()).collect();
    let groups = pack_tokens(&tokens);
    let group = &groups[0];

    c.bench_function("score_pack", |b| {
        let mut buf = Vec::new();
        b.iter(|| {
            let mut total = 0.0;
            for line in &lines {
                for token in line.split(' ') {
                    score_pack(group, token, &opts, &mut buf);
                    total += buf.iter().sum::<f64>();
                }
            }
            total
        });
    });
}

fn bench_engine_search(c: &mut Criterion) {
    let mut engine = SearchEngine::new(SearchOptions::default());
    engine.set_source(
        corpus()
            .into_iter()
            .map(|line| Arc::new(line) as Arc<dyn Searchable>)
            .collect(),
    );

    c.bench_function("engine_search", |b| {
        b.iter(|| engine.search("practical garden guide").len());
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_single_token, bench_packed, bench_engine_search
);
criterion_main!(benches);
