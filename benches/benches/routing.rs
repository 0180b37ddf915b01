// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for routed event dispatch over element chains.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use std::rc::Rc;

use uxml::{Builtins, ElementArgs, ElementId, ElementTree, MouseArgs, Registries, handler};

fn chain(depth: usize, listeners: bool) -> (ElementTree, Builtins, ElementId) {
    let mut registries = Registries::new("UxmlElement");
    let b = Builtins::register(&mut registries);
    registries.seal();
    let mut tree = ElementTree::new(Rc::new(registries));
    let mut leaf = tree.create(b.panel);
    for _ in 1..depth {
        let next = tree.create(b.control);
        tree.add_child(leaf, next).unwrap();
        leaf = next;
    }
    if listeners {
        let ids: Vec<_> = tree.ancestors(leaf).collect();
        for id in ids {
            tree.add_handler(
                id,
                b.mouse_down,
                handler(|_: &mut ElementTree, args: &mut ElementArgs<MouseArgs>| {
                    black_box(args.current);
                    Ok(())
                }),
            )
            .unwrap();
        }
    }
    (tree, b, leaf)
}

fn bench_routing(c: &mut Criterion) {
    let args = MouseArgs {
        position: Point::new(1.0, 1.0),
        local: Point::new(1.0, 1.0),
        pointer_id: 0,
    };
    let mut group = c.benchmark_group("routing");

    for depth in [4_usize, 16, 64] {
        group.bench_function(BenchmarkId::new("bubble_empty", depth), |bench| {
            let (mut tree, b, leaf) = chain(depth, false);
            bench.iter(|| black_box(tree.raise(b.mouse_down, leaf, args).unwrap().report));
        });
        group.bench_function(BenchmarkId::new("bubble_listeners", depth), |bench| {
            let (mut tree, b, leaf) = chain(depth, true);
            bench.iter(|| black_box(tree.raise(b.mouse_down, leaf, args).unwrap().report));
        });
        group.bench_function(BenchmarkId::new("drill_down_empty", depth), |bench| {
            let (mut tree, b, leaf) = chain(depth, false);
            bench.iter(|| black_box(tree.raise(b.preview_mouse_down, leaf, args).unwrap().report));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_routing);
criterion_main!(benches);
