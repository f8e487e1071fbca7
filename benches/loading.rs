//! Benchmarks for plugin loading and mapping resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use mosaic::{load, LoadOptions, Registry};

/// A sequence of `libraries` libraries, each mapped onto `targets` targets.
fn payloads(libraries: usize, targets: usize) -> Value {
    let mut items = Vec::new();
    for l in 0..libraries {
        items.push(json!({
            "type": "library",
            "name": format!("lib-{l}"),
            "elements": { "button": {}, "card": {}, "dialog": {} }
        }));
    }
    for l in 0..libraries {
        for t in 0..targets {
            items.push(json!({
                "type": "mapping",
                "name": format!("lib-{l}-target-{t}"),
                "library": format!("lib-{l}"),
                "target": format!("target-{t}"),
                "elementType": "component",
                "elements": { "button": "Button", "card": "Card" }
            }));
        }
    }
    for t in 0..targets {
        items.push(json!({
            "type": "generator",
            "name": format!("gen-{t}"),
            "target": format!("target-{t}")
        }));
    }
    Value::Array(items)
}

// -- Loading benchmarks --

fn bench_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("loading");
    let options = LoadOptions::default();

    let small = payloads(2, 2);
    let large = payloads(50, 10);

    group.bench_function("load_small", |b| {
        b.iter(|| {
            let mut registry = Registry::new();
            load(&mut registry, black_box(small.clone()), &options).unwrap()
        })
    });

    group.bench_function("load_large", |b| {
        b.iter(|| {
            let mut registry = Registry::new();
            load(&mut registry, black_box(large.clone()), &options).unwrap()
        })
    });

    group.finish();
}

// -- Resolution benchmarks --

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");

    let mut registry = Registry::new();
    load(&mut registry, payloads(50, 10), &LoadOptions::default()).unwrap();

    group.bench_function("map_hit", |b| {
        b.iter(|| registry.map(black_box("target-9"), black_box("lib-49"), "component"))
    });

    group.bench_function("map_miss", |b| {
        b.iter(|| registry.map(black_box("target-9"), black_box("lib-49"), "icon"))
    });

    group.finish();
}

criterion_group!(benches, bench_loading, bench_resolution);
criterion_main!(benches);
