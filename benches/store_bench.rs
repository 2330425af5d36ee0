//! Benchmarks for the subscription store
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_decimal::Decimal;
use subtrack::store::*;

fn create_candidates(count: usize) -> Vec<NewSubscription> {
    (0..count)
        .map(|i| {
            let frequency = if i % 3 == 0 {
                Frequency::Yearly
            } else {
                Frequency::Monthly
            };
            NewSubscription::new(format!("sub-{}", i), Decimal::new(999 + i as i64, 2), frequency)
        })
        .collect()
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for size in [100, 1000, 10000] {
        let candidates = create_candidates(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("add_{}", size), |b| {
            b.iter(|| {
                let mut store = SubscriptionStore::new();
                for candidate in candidates.iter().cloned() {
                    store.add(black_box(candidate)).unwrap();
                }
                store
            })
        });
    }

    group.finish();
}

fn bench_total(c: &mut Criterion) {
    let mut group = c.benchmark_group("total_annual_cost");

    for size in [100, 1000, 10000] {
        let store = SubscriptionStore::seeded(create_candidates(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("total_{}", size), |b| {
            b.iter(|| black_box(&store).total_annual_cost())
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let store = SubscriptionStore::seeded(create_candidates(1000)).unwrap();

    c.bench_function("remove_middle_of_1000", |b| {
        b.iter(|| {
            let mut store = store.clone();
            store.remove(black_box(500))
        })
    });
}

criterion_group!(benches, bench_add, bench_total, bench_remove);
criterion_main!(benches);
