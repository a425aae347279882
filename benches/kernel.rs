#[macro_use]
extern crate criterion;
extern crate num;
extern crate tilebrot;

use criterion::{black_box, Criterion};
use num::Complex;
use tilebrot::kernel::escape_count;

fn interior_orbit(c: &mut Criterion) {
    c.bench_function("interior orbit runs to the cap", |b| {
        b.iter(|| escape_count(black_box(Complex::new(-1.0, 0.0)), 5_000, 2.0))
    });
}

fn escaping_orbit(c: &mut Criterion) {
    c.bench_function("exterior orbit escapes early", |b| {
        b.iter(|| escape_count(black_box(Complex::new(0.3, 0.6)), 5_000, 2.0))
    });
}

criterion_group!(benches, interior_orbit, escaping_orbit);
criterion_main!(benches);
