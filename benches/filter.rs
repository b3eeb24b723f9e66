//! Criterion benchmarks for the filter/selection kernel.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use trialmap::dashboard::Dashboard;
use trialmap::filter::{apply_filter, unique_values, FilterDimension, FilterState};
use trialmap::record::AssetRecord;

fn make_assets(count: usize) -> Vec<AssetRecord> {
    (0..count)
        .map(|i| {
            let mut a = AssetRecord::new(format!("NCT{:08}", i))
                .with_name(format!("product-{}", i % 97))
                .with_sponsor(format!("sponsor-{}", i % 31))
                .with_phase(format!("Phase {}", 1 + i % 3));
            if i % 4 == 0 {
                a = a.with_sponsor(format!("sponsor-{}", (i / 4) % 31));
            }
            if i % 5 != 0 {
                let lat = ((i * 37) % 180) as f64 - 90.0;
                let lng = ((i * 53) % 360) as f64 - 180.0;
                a = a.with_location(lat, lng);
            }
            a
        })
        .collect()
}

/// Benchmark apply_filter() with varying dataset sizes.
fn bench_apply_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_filter");

    for size in [100, 1_000, 10_000].iter() {
        let assets = make_assets(*size);
        let mut state = FilterState::new();
        state.set(FilterDimension::Sponsor, ["sponsor-3", "sponsor-7", "sponsor-11"]);
        state.set(FilterDimension::Name, ["product-5", "product-9"]);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("two_dims", size), &assets, |b, assets| {
            b.iter(|| black_box(apply_filter(assets, &state).len()));
        });
    }

    group.finish();
}

/// Benchmark unique_values() over the multi-valued sponsor dimension.
fn bench_unique_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("unique_values");

    for size in [100, 1_000, 10_000].iter() {
        let assets = make_assets(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("sponsor", size), &assets, |b, assets| {
            b.iter(|| black_box(unique_values(assets, FilterDimension::Sponsor).len()));
        });
    }

    group.finish();
}

/// Full view derivation, as done once per render.
fn bench_dashboard_view(c: &mut Criterion) {
    let mut dashboard = Dashboard::new(make_assets(5_000));
    dashboard.set_filter(FilterDimension::Sponsor, ["sponsor-1", "sponsor-2"]);
    dashboard.select("NCT00000042");

    c.bench_function("dashboard_view_5k", |b| {
        b.iter(|| {
            let view = dashboard.view();
            black_box((view.filtered.len(), view.pins.len()))
        })
    });
}

criterion_group!(
    benches,
    bench_apply_filter,
    bench_unique_values,
    bench_dashboard_view
);
criterion_main!(benches);
