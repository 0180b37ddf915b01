// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for property storage and element-tree property access.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::rc::Rc;
use std::sync::Once;

use uxml::{Builtins, ElementTree, Registries};
use uxml_property::{Property, PropertyMetadataBuilder, PropertyRegistry, PropertyStore};
use uxml_types::TypeRegistry;

fn bench_store(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: PropertyStore<u32>={} ErasedValue={}",
            core::mem::size_of::<PropertyStore<u32>>(),
            core::mem::size_of::<uxml_property::ErasedValue>(),
        );
    });

    let mut types = TypeRegistry::new();
    let element = types.register("UxmlElement", None);
    let mut registry = PropertyRegistry::new();
    let width: Property<f64> = registry.register(
        &types,
        "Width",
        element,
        PropertyMetadataBuilder::new(0.0_f64).build(),
    );
    let many: Vec<Property<u32>> = (0..16)
        .map(|i| {
            let name: &'static str = Box::leak(format!("P{i}").into_boxed_str());
            registry.register(&types, name, element, PropertyMetadataBuilder::new(0_u32).build())
        })
        .collect();

    let mut group = c.benchmark_group("property/store");

    group.bench_function("get_default", |b| {
        let store = PropertyStore::<u32>::new(1);
        b.iter(|| black_box(store.get(width, &registry)));
    });

    group.bench_function("get_local", |b| {
        let mut store = PropertyStore::<u32>::new(1);
        let _ = store.set(width, 100.0, &registry);
        b.iter(|| black_box(store.get(width, &registry)));
    });

    group.bench_function("set_changed", |b| {
        b.iter_batched(
            || PropertyStore::<u32>::new(1),
            |mut store| black_box(store.set(width, 42.0, &registry)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("set_same_value", |b| {
        let mut store = PropertyStore::<u32>::new(1);
        let _ = store.set(width, 42.0, &registry);
        b.iter(|| black_box(store.set(width, 42.0, &registry)));
    });

    for n in [4_usize, 16] {
        group.bench_function(BenchmarkId::new("get_among", n), |b| {
            let mut store = PropertyStore::<u32>::new(1);
            for (i, p) in many.iter().take(n).enumerate() {
                let _ = store.set(*p, i as u32 + 1, &registry);
            }
            let last = many[n - 1];
            b.iter(|| black_box(store.get(last, &registry)));
        });
    }

    group.finish();
}

fn bench_tree(c: &mut Criterion) {
    let mut registries = Registries::new("UxmlElement");
    let builtins = Builtins::register(&mut registries);
    let font_size: Property<f64> = registries.properties.register(
        &registries.types,
        "FontSize",
        registries.root_type(),
        PropertyMetadataBuilder::new(12.0_f64).inherits(true).build(),
    );
    registries.seal();
    let registries = Rc::new(registries);

    // A chain 0 <- 1 <- ... <- depth-1.
    let depth = 16;
    let mut tree = ElementTree::new(Rc::clone(&registries));
    let root = tree.create(builtins.panel);
    let mut leaf = root;
    for _ in 1..depth {
        let next = tree.create(builtins.panel);
        tree.add_child(leaf, next).unwrap();
        leaf = next;
    }
    tree.set(root, font_size, 16.0).unwrap();

    let mut group = c.benchmark_group("property/tree");

    group.bench_function(BenchmarkId::new("inherited", depth), |b| {
        b.iter(|| black_box(tree.get_inherited(leaf, font_size)));
    });

    group.bench_function("set_notify_queue", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x += 1.0;
            black_box(tree.set(leaf, builtins.width, x))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_store, bench_tree);
criterion_main!(benches);
