//! Equipping a type nobody hoarded panics; `try_equip` reports it instead.
//!
//! Run with: cargo run --example missing_equip_panic

use std::panic;

use hoardkit::prelude::*;

struct NonRegisteredService;

fn main() {
    println!("=== Missing equip ===\n");

    match try_equip::<NonRegisteredService>(&EquipOptions::new(), None) {
        Ok(_) => println!("unexpectedly found"),
        Err(err) => println!("try_equip: {err}"),
    }

    panic::set_hook(Box::new(|_| {}));
    let recovered = panic::catch_unwind(|| {
        let _ = equip_default::<NonRegisteredService>();
    });
    let _ = panic::take_hook();

    if let Err(payload) = recovered {
        let message = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .unwrap_or("<non-string panic>");
        println!("Recovered from panic: {message}");
    }
}
