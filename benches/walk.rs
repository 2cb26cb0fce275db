// SPDX-License-Identifier: AGPL-3.0-or-later
//! Benchmark for the namespace walk.
//!
//! Walks a synthetic in-memory tree so the numbers reflect walker and report
//! overhead rather than the WMI service.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wmixlib::provider::mock::MockProvider;
use wmixlib::{ExclusionSet, JsonReport, NamespacePath, TextReport, Walker};

fn bench_text_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_text");
    for depth in [1usize, 3] {
        let provider = MockProvider::synthetic(depth, 3, 8, 4, 6);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &provider, |b, provider| {
            let walker = Walker::new(provider, ExclusionSet::default());
            b.iter(|| {
                provider.clear_calls();
                let mut report = TextReport::new(std::io::sink());
                let _ = black_box(walker.walk(&NamespacePath::root(), &mut report));
            });
        });
    }
    group.finish();
}

fn bench_json_walk(c: &mut Criterion) {
    let provider = MockProvider::synthetic(2, 3, 8, 4, 6);
    let walker = Walker::new(&provider, ExclusionSet::default());
    c.bench_function("walk_json", |b| {
        b.iter(|| {
            provider.clear_calls();
            let mut report = JsonReport::new();
            let _ = black_box(walker.walk(&NamespacePath::root(), &mut report));
            black_box(report.classes().len())
        });
    });
}

fn bench_exclusion_match(c: &mut Criterion) {
    let exclusions = ExclusionSet::default();
    let names = [
        "Win32_PnPEntity",
        "Win32_OperatingSystem",
        "CIM_DataFile",
        "Win32_BIOS",
        "MSFT_NetAdapter",
    ];
    c.bench_function("exclusion_match", |b| {
        b.iter(|| {
            names
                .iter()
                .filter(|n| exclusions.is_excluded(black_box(n)))
                .count()
        });
    });
}

criterion_group!(benches, bench_text_walk, bench_json_walk, bench_exclusion_match);
criterion_main!(benches);
