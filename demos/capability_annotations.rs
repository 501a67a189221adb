//! Equip values through a trait they were declared to implement.
//!
//! Run with: cargo run --example capability_annotations

use hoardkit::prelude::*;

trait Execute: Send + Sync {
    fn execute(&self) -> &'static str;
}

struct ServiceA;
struct ServiceB;

impl Execute for ServiceA {
    fn execute(&self) -> &'static str {
        "Service A"
    }
}

impl Execute for ServiceB {
    fn execute(&self) -> &'static str {
        "Service B"
    }
}

fn main() {
    println!("=== Capability annotations ===\n");

    hoard(
        &HoardOptions::new(),
        loot![remember_as(
            Thing::new(ServiceA).implementing::<ServiceA, dyn Execute>(|v| v),
            "serviceA"
        )],
    );
    hoard(
        &HoardOptions::new(),
        loot![remember_as(
            Thing::new(ServiceB).implementing::<ServiceB, dyn Execute>(|v| v),
            "serviceB"
        )],
    );

    let a = equip_capability::<dyn Execute>(
        &EquipOptions::new().with_custom_item_name("serviceA"),
        None,
    );
    let b = equip_capability::<dyn Execute>(
        &EquipOptions::new().with_custom_item_name("serviceB"),
        None,
    );
    println!("by name: {} {}", a.execute(), b.execute());

    // Without a name the earliest declaring entry answers
    let first = equip_capability::<dyn Execute>(&EquipOptions::new(), None);
    println!("unnamed: {}", first.execute());
}
