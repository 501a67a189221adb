//! Group related values in a named inventory.
//!
//! Run with: cargo run --example custom_inventory

use hoardkit::prelude::*;

#[derive(Debug)]
struct Mailer {
    host: &'static str,
}

fn main() {
    println!("=== Custom inventory ===\n");

    let notifications = use_inventory("notifications");
    notifications
        .put(remember_as(Thing::new(Mailer { host: "smtp.primary" }), "primary"))
        .put(remember_as(Thing::new(Mailer { host: "smtp.backup" }), "backup"))
        .put_if_absent(remember_as(Thing::new(Mailer { host: "ignored" }), "primary"));

    println!("keys in order:");
    for (key, item) in notifications.loadout() {
        println!("   {:<40} -> {}", key.replace('\n', "\\n"), item.value().type_name());
    }

    hoard(&HoardOptions::new(), loot![&notifications]);

    let in_notifications = EquipOptions::new().with_custom_inventory_name("notifications");
    for name in ["primary", "backup"] {
        let mailer = equip::<Mailer>(&in_notifications.clone().with_custom_item_name(name), None);
        println!("{name:<8} = {}", mailer.host);
    }

    // Inventory entries are also offered to the default inventory
    println!("default  = {}", equip_default::<Mailer>().host);
}
