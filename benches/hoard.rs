//! Registration and lookup benchmarks.
//!
//! Run with: `cargo bench --bench hoard`
//!
//! Lookups run against a private hoarder filled with 2000 named entries in
//! the default inventory and a small `test` inventory, so the capability scan
//! has a realistic amount of order to walk.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use hoardkit::prelude::*;

trait Fooer: Send + Sync {
    fn foo(&self) -> u64;
}

#[derive(Debug, Default)]
struct FooImpl;

impl Fooer for FooImpl {
    fn foo(&self) -> u64 {
        7
    }
}

#[derive(Debug, Default)]
struct Filler(#[allow(dead_code)] u64);

fn foo() -> Thing {
    Thing::new(FooImpl).implementing::<FooImpl, dyn Fooer>(|v| v)
}

fn huge_hoard() -> Hoarder {
    let hoarder = Hoarder::new();
    let private = HoardOptions::new()
        .with_should_replace_global(false)
        .with_custom_hoarder(&hoarder);

    for i in 0..1000u64 {
        hoard(&private, loot![remember_as(Thing::new(Filler(i)), &format!("test{i}"))]);
    }

    let test = use_inventory("test");
    test.put(remember_as(Thing::new(String::from("test353")), "test"))
        .put(remember_as(foo(), "test"));
    hoard(&private, loot![test, Thing::new(String::from("plain")), foo()]);

    for i in 1000..2000u64 {
        hoard(&private, loot![remember_as(Thing::new(Filler(i)), &format!("test{i}"))]);
    }
    hoarder
}

// ============================================================================
// Registration
// ============================================================================

fn bench_hoard(c: &mut Criterion) {
    let mut group = c.benchmark_group("hoard");
    let private = HoardOptions::new().with_should_replace_global(false);

    group.bench_function("single", |b| {
        b.iter(|| black_box(hoard(&private, loot![foo()])))
    });

    group.bench_function("ten", |b| {
        b.iter(|| {
            black_box(hoard(
                &private,
                loot![foo(), foo(), foo(), foo(), foo(), foo(), foo(), foo(), foo(), foo()],
            ))
        })
    });

    group.bench_function("single_into_custom", |b| {
        let custom = Hoarder::new();
        let options = private.clone().with_custom_hoarder(&custom);
        b.iter(|| black_box(hoard(&options, loot![foo()])))
    });

    group.finish();
}

// ============================================================================
// Lookup
// ============================================================================

fn bench_equip(c: &mut Criterion) {
    let hoarder = huge_hoard();
    let default = EquipOptions::new();
    let named = EquipOptions::new()
        .with_custom_inventory_name("test")
        .with_custom_item_name("test");

    let mut group = c.benchmark_group("equip");

    group.bench_function("concrete_default", |b| {
        b.iter(|| black_box(hoarder.equip::<String>(black_box(&default))))
    });

    group.bench_function("concrete_named", |b| {
        b.iter(|| black_box(hoarder.equip::<String>(black_box(&named))))
    });

    group.bench_function("capability_default", |b| {
        b.iter(|| black_box(hoarder.equip_capability::<dyn Fooer>(black_box(&default))))
    });

    group.bench_function("capability_named", |b| {
        b.iter(|| black_box(hoarder.equip_capability::<dyn Fooer>(black_box(&named))))
    });

    group.bench_function("miss", |b| {
        b.iter(|| black_box(hoarder.try_equip::<u128>(black_box(&default)).is_err()))
    });

    group.finish();
}

criterion_group!(benches, bench_hoard, bench_equip);
criterion_main!(benches);
