//! Criterion benchmarks for the text command parser.
//!
//! Run with:
//! ```bash
//! cargo bench --package touchpad-core --bench command_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use touchpad_core::parse;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("drag", |b| b.iter(|| parse(black_box("drag 12,-7"))));
    group.bench_function("drag_malformed", |b| b.iter(|| parse(black_box("drag abc,50"))));
    group.bench_function("scroll", |b| b.iter(|| parse(black_box("scrollY -3"))));
    group.bench_function("left_click", |b| b.iter(|| parse(black_box("left_click"))));
    group.bench_function("chord", |b| b.iter(|| parse(black_box("ctrl_shift_tab"))));
    group.bench_function("unknown", |b| b.iter(|| parse(black_box("foo bar"))));

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
