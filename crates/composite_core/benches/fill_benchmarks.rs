//! Criterion benchmarks for the GapFiller passes.
//!
//! Measures each interpolation method on synthetic composites of growing
//! size with a Missing border and scattered interior gaps.

use composite_core::math::filters::{minimum_filter, BoundaryMode};
use composite_core::{fill, Grid, InterpolationMethod};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;

/// Synthetic composite: smooth field, Missing border, every 7th cell Missing.
fn generate_grid(size: usize) -> Grid {
    let border = size / 10;
    let cells = Array2::from_shape_fn((size, size), |(r, c)| {
        let edge = r < border || c < border || r >= size - border || c >= size - border;
        if edge || (r * size + c) % 7 == 0 {
            None
        } else {
            Some((r as f64 / 9.0).sin() * 30.0 + (c as f64 / 13.0).cos() * 10.0)
        }
    });
    Grid::new(cells)
}

/// Benchmark a single pass of each method.
fn bench_fill_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");

    for size in [32, 64, 128] {
        let grid = generate_grid(size);
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::Nearest,
            InterpolationMethod::Cubic,
        ] {
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), size),
                &grid,
                |b, grid| {
                    b.iter(|| fill(black_box(grid.clone()), method).unwrap());
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the usual linear-then-nearest workflow.
fn bench_two_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_pass");

    for size in [64, 128] {
        let grid = generate_grid(size);
        group.bench_with_input(BenchmarkId::new("linear_nearest", size), &grid, |b, grid| {
            b.iter(|| {
                let once = fill(black_box(grid.clone()), InterpolationMethod::Linear).unwrap();
                fill(once, InterpolationMethod::Nearest).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark the compositing minimum filter.
fn bench_minimum_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimum_filter");

    for size in [128, 512] {
        let grid = generate_grid(size);
        group.bench_with_input(BenchmarkId::new("size_2", size), grid.cells(), |b, cells| {
            b.iter(|| minimum_filter(black_box(cells), 2, BoundaryMode::Reflect));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fill_methods,
    bench_two_pass,
    bench_minimum_filter
);
criterion_main!(benches);
