use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use range_trainer::range::notation::{format, parse};
use range_trainer::range::{ActionKind, Position, RangeStore, TrainingContext};

const WIDE: &str = "22-AA, A2s-AKs, K9s-KQs, Q9s-QJs, J9s-JTs, T8s-T9s, 97s-98s, 86s-87s, 75s-76s, \
                    ATo-AKo, KTo-KQo, QTo-QJo, JTo";

fn bench_parse(c: &mut Criterion) {
    let mut g = c.benchmark_group("parse");
    for (name, text) in [("tight", "QQ-AA, AKs, AKo"), ("wide", WIDE)] {
        g.bench_with_input(BenchmarkId::new("ranges", name), text, |b, input| {
            b.iter(|| parse(black_box(input)))
        });
    }
    g.finish();
}

fn bench_format(c: &mut Criterion) {
    let ctx = TrainingContext::rfi(Position::Btn);
    let store = RangeStore::default().apply_notation(ctx, ActionKind::Rfi, WIDE);
    let slot = store.slot(ctx).into_owned();
    c.bench_function("format_wide", |b| b.iter(|| format(black_box(&slot), ActionKind::Rfi)));
}

fn bench_json(c: &mut Criterion) {
    let ctx = TrainingContext::rfi(Position::Co);
    let store = RangeStore::default().apply_notation(ctx, ActionKind::Rfi, WIDE);
    let json = store.to_json().unwrap_or_default();
    c.bench_function("store_from_json", |b| b.iter(|| RangeStore::from_json(black_box(&json))));
}

criterion_group!(benches, bench_parse, bench_format, bench_json);
criterion_main!(benches);
