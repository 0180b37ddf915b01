// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for surface hit testing, painting and Bezier bounds.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{BezPath, Point, Rect};
use uxml_surface::{Paint, RecordingCanvas, SurfaceTree};

fn grid(n: usize, cell: f64) -> SurfaceTree<u32> {
    let side = n as f64 * cell;
    let mut tree = SurfaceTree::new(Rect::new(0.0, 0.0, side, side));
    let root = tree.root();
    for y in 0..n {
        for x in 0..n {
            let s = tree.create_surface(root, Some((y * n + x) as u32)).unwrap();
            let (x0, y0) = (x as f64 * cell, y as f64 * cell);
            tree.set_layout_rect(s, Rect::new(x0, y0, x0 + cell, y0 + cell))
                .unwrap();
            tree.display_list_mut(s)
                .unwrap()
                .rect(Rect::new(0.0, 0.0, cell, cell), Paint::default());
        }
    }
    tree
}

fn bench_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface");

    for n in [8_usize, 32] {
        let tree = grid(n, 10.0);
        let root = tree.root();
        group.bench_function(BenchmarkId::new("hit_test_grid", n * n), |b| {
            // Back-most child: the worst case for front-to-back testing.
            b.iter(|| black_box(tree.hit_test(root, Point::new(1.0, 1.0))));
        });
        group.bench_function(BenchmarkId::new("paint_grid", n * n), |b| {
            let mut canvas = RecordingCanvas::new();
            b.iter(|| {
                canvas.clear();
                tree.paint(&mut canvas);
                black_box(canvas.ops().len())
            });
        });
    }

    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");

    let (p1, c1, c2, p2) = (
        Point::new(0.0, 0.0),
        Point::new(3.0, 4.0),
        Point::new(-1.0, 4.0),
        Point::new(2.0, 0.0),
    );
    group.bench_function("cubic_bounds", |b| {
        b.iter(|| black_box(uxml_geometry::cubic_bounds(p1, c1, c2, p2)));
    });
    group.bench_function("cubic_bounds_monotonic", |b| {
        let (c1, c2, p2) = (Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0));
        b.iter(|| black_box(uxml_geometry::cubic_bounds(p1, c1, c2, p2)));
    });
    group.bench_function("quad_bounds", |b| {
        b.iter(|| black_box(uxml_geometry::quad_bounds(p1, c1, p2)));
    });

    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    for i in 0..64 {
        let x = f64::from(i);
        path.curve_to((x + 0.3, 2.0), (x + 0.6, -2.0), (x + 1.0, 0.0));
    }
    group.bench_function("path_bounds_64", |b| {
        b.iter(|| black_box(uxml_geometry::path_bounds(&path)));
    });

    group.finish();
}

criterion_group!(benches, bench_surface, bench_bounds);
criterion_main!(benches);
