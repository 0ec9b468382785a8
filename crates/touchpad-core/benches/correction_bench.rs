//! Criterion benchmarks for [`BoundaryCorrector`] and [`MonitorLayout`].
//!
//! Every `drag` datagram runs one correction, so the worst case (a full gap
//! scan) must stay far below the phone's send interval.
//!
//! Run with:
//! ```bash
//! cargo bench --package touchpad-core --bench correction_bench
//! ```

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use touchpad_core::{BoundaryCorrector, MonitorLayout, Point, ScreenRect};

// ── Layout fixture builders ───────────────────────────────────────────────────

/// Creates `n` 1080p monitors in a row with a `gap` pixel hole between each.
fn build_row_with_gaps(n: usize, gap: i32) -> Arc<MonitorLayout> {
    let monitors = (0..n)
        .map(|i| ScreenRect::new(i as i32 * (1920 + gap), 0, 1920, 1080))
        .collect();
    Arc::new(MonitorLayout::new(monitors))
}

// ── Benchmarks: classify ──────────────────────────────────────────────────────

fn bench_classify(c: &mut Criterion) {
    let layout = build_row_with_gaps(3, 580);
    let mut group = c.benchmark_group("classify");

    group.bench_function("on_first_monitor", |b| {
        b.iter(|| layout.classify(black_box(Point::new(960, 540))))
    });

    group.bench_function("in_gap", |b| {
        b.iter(|| layout.classify(black_box(Point::new(2000, 540))))
    });

    group.bench_function("outside", |b| {
        b.iter(|| layout.classify(black_box(Point::new(-10, -10))))
    });

    group.finish();
}

// ── Benchmarks: correct ───────────────────────────────────────────────────────

/// Destination already on a monitor: the common, cheap path.
fn bench_correct_unchanged(c: &mut Criterion) {
    let corrector = BoundaryCorrector::new(build_row_with_gaps(2, 580));

    c.bench_function("correct/unchanged", |b| {
        b.iter(|| corrector.correct(black_box(Point::new(900, 500)), black_box(Point::new(910, 505))))
    });
}

/// Crossing gaps of increasing width from the edge of the left monitor.
fn bench_correct_gap_width_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("correct_gap_width");

    for gap in [10, 100, 300, 580] {
        let corrector = BoundaryCorrector::new(build_row_with_gaps(2, gap));
        group.bench_with_input(BenchmarkId::new("gap_px", gap), &gap, |b, _| {
            b.iter(|| {
                corrector.correct(black_box(Point::new(1910, 500)), black_box(Point::new(1925, 500)))
            })
        });
    }

    group.finish();
}

/// A gap wider than the scan limit: the full budget is spent before clamping.
fn bench_correct_scan_exhaustion(c: &mut Criterion) {
    let corrector = BoundaryCorrector::new(build_row_with_gaps(2, 2000));

    c.bench_function("correct/exhausted", |b| {
        b.iter(|| corrector.correct(black_box(Point::new(1910, 500)), black_box(Point::new(1930, 500))))
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_correct_unchanged,
    bench_correct_gap_width_scaling,
    bench_correct_scan_exhaustion,
);
criterion_main!(benches);
