//! Refresh and mutation benchmarks over the loopback store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logbook_testkit::{sample_draft, LoopbackHarness};

/// Benchmark a full refresh: request, store filtering, decode, normalize.
fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh");

    for size in [100, 1_000, 5_000].iter() {
        let harness = LoopbackHarness::seeded(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &harness, |b, harness| {
            b.iter(|| {
                let count = harness.session.refresh().unwrap();
                black_box(count);
            });
        });
    }
    group.finish();
}

/// Benchmark create followed by its automatic refresh.
fn bench_create(c: &mut Criterion) {
    c.bench_function("create_and_refresh", |b| {
        let harness = LoopbackHarness::seeded(100);
        b.iter(|| {
            harness.session.create(black_box(sample_draft())).unwrap();
        });
    });
}

/// Benchmark rendering the current page after a refresh.
fn bench_render(c: &mut Criterion) {
    let harness = LoopbackHarness::seeded(1_000);
    harness.session.refresh().unwrap();

    c.bench_function("render_1000", |b| {
        b.iter(|| black_box(harness.session.render()));
    });
}

criterion_group!(benches, bench_refresh, bench_create, bench_render);
criterion_main!(benches);
