//! Benchmarks for the price store and view builder

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use price_tracker::clock::ManualClock;
use price_tracker::flash::FlashEntries;
use price_tracker::gateway::{ConnectionStatus, LoopbackGateway};
use price_tracker::store::{PriceStore, RandomWalk, RngSource};
use price_tracker::view::build_view;
use std::sync::Arc;

fn symbols() -> Vec<String> {
    (0..25).map(|i| format!("SYM{i:02}")).collect()
}

fn store() -> PriceStore {
    PriceStore::new(
        Arc::new(LoopbackGateway::new(64)),
        RandomWalk::default(),
        Box::new(RngSource::seeded(42)),
        Arc::new(ManualClock::new(0)),
    )
}

fn benchmark_synthetic_update(c: &mut Criterion) {
    let store = store();
    let symbols = symbols();

    c.bench_function("synthetic_update_25", |b| {
        b.iter(|| store.generate_synthetic_update(black_box(&symbols)))
    });
}

fn benchmark_merge_inbound(c: &mut Criterion) {
    let store = store();

    c.bench_function("merge_inbound", |b| {
        b.iter(|| store.merge_inbound(black_box("SYM07|123.45")))
    });
}

fn benchmark_build_view(c: &mut Criterion) {
    let store = store();
    let symbols = symbols();
    store.generate_synthetic_update(&symbols);
    let prices = store.snapshot();
    let flashes = FlashEntries::default();

    c.bench_function("build_view_25", |b| {
        b.iter(|| {
            build_view(
                black_box(&symbols),
                &prices,
                ConnectionStatus::Connected,
                true,
                &flashes,
            )
        })
    });
}

criterion_group!(
    benches,
    benchmark_synthetic_update,
    benchmark_merge_inbound,
    benchmark_build_view
);
criterion_main!(benches);
