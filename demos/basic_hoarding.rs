//! Hoard a few values into the global hoarder and equip them by type.
//!
//! Run with: cargo run --example basic_hoarding

use hoardkit::prelude::*;

#[derive(Debug)]
struct Database {
    url: String,
}

#[derive(Debug)]
struct Service {
    name: &'static str,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Basic hoarding ===\n");

    // 1. Unnamed values, one per type
    println!("1. One value per type");
    hoard(
        &HoardOptions::new(),
        loot![
            Thing::new(42i64),
            Thing::new(String::from("hello")),
            Thing::new(Database {
                url: "postgres://localhost/app".into(),
            }),
        ],
    );
    println!("   i64      = {}", equip_default::<i64>());
    println!("   String   = {}", equip_default::<String>());
    println!("   Database = {}", equip_default::<Database>().url);
    println!();

    // 2. Same type again: the newest unnamed value wins
    println!("2. Last write wins");
    hoard(&HoardOptions::new(), loot![Thing::new(70i64)]);
    println!("   i64      = {} (was 42)", equip_default::<i64>());
    println!();

    // 3. Several values of one type, told apart by name
    println!("3. Named values of the same type");
    hoard(
        &HoardOptions::new(),
        loot![
            remember_as(Thing::new(Service { name: "Service 1" }), "service1"),
            remember_as(Thing::new(Service { name: "Service 2" }), "service2"),
        ],
    );
    for item in ["service1", "service2"] {
        let service = equip::<Service>(&EquipOptions::new().with_custom_item_name(item), None);
        println!("   {item:<8} = {}", service.name);
    }
}
