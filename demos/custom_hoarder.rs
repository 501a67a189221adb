//! Keep registrations out of the global hoarder.
//!
//! Run with: cargo run --example custom_hoarder

use hoardkit::prelude::*;

fn main() {
    println!("=== Custom hoarder ===\n");

    // A registration that never reaches the global hoarder
    let private = HoardOptions::new().with_should_replace_global(false);
    let custom = hoard(
        &private,
        loot![Thing::new(100i32), Thing::new(String::from("custom string"))],
    );

    let i = equip::<i32>(&EquipOptions::new(), Some(&custom));
    let s = equip::<String>(&EquipOptions::new(), Some(&custom));
    println!("custom: {i} {s}");
    println!(
        "global has i32? {}",
        try_equip::<i32>(&EquipOptions::new(), None).is_ok()
    );

    // Later registrations can target the same custom hoarder
    let into_custom = private.with_custom_hoarder(&custom);
    hoard(&into_custom, loot![Thing::new(42i32)]);

    // Global registrations evolve separately
    hoard(&HoardOptions::new(), loot![Thing::new(50i32)]);
    hoard(&HoardOptions::new(), loot![Thing::new(70i32)]);

    println!(
        "custom i32 = {}, global i32 = {}",
        equip::<i32>(&EquipOptions::new(), Some(&custom)),
        equip_default::<i32>()
    );
}
