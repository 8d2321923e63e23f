//! Lattice generation benchmark.
//!
//! Generation runs once at startup, but it must stay cheap enough that a
//! config reload (or a future live-tuning UI) never hitches the frame loop.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lattice_core::PointLattice;

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_10_cubed", |b| {
        b.iter(|| PointLattice::generate(black_box(10), black_box(-0.7), black_box(0.7)))
    });

    c.bench_function("generate_64_cubed", |b| {
        b.iter(|| PointLattice::generate(black_box(64), black_box(-0.7), black_box(0.7)))
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
