//! Free-function entry points: hoard values, equip them by type.
//!
//! ## Example Usage
//!
//! ```
//! use hoardkit::builder::{EquipOptions, HoardOptions};
//! use hoardkit::equip::{equip, equip_default, hoard, remember_as};
//! use hoardkit::loot;
//! use hoardkit::thing::Thing;
//!
//! struct Database {
//!     url: &'static str,
//! }
//!
//! hoard(
//!     &HoardOptions::new(),
//!     loot![
//!         Thing::new(Database { url: "postgres://primary" }),
//!         remember_as(Thing::new(Database { url: "postgres://replica" }), "replica"),
//!     ],
//! );
//!
//! assert_eq!(equip_default::<Database>().url, "postgres://primary");
//! let replica = equip::<Database>(&EquipOptions::new().with_custom_item_name("replica"), None);
//! assert_eq!(replica.url, "postgres://replica");
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::builder::{EquipOptions, HoardOptions};
use crate::error::EquipError;
use crate::global::{global, install_global};
use crate::hoarder::{Hoarder, Loot};
use crate::inventory::Inventory;
use crate::item::Item;
use crate::key;
use crate::thing::Thing;

/// Registers `loot` and returns the hoarder holding it.
///
/// A fresh hoarder is built from `loot`. With `should_replace_global` set
/// (the default) it becomes the global hoarder if none exists yet, otherwise
/// it is merged into the global one. With a custom hoarder set, the fresh
/// hoarder is merged into it and the custom hoarder is returned; otherwise
/// the fresh hoarder is returned.
pub fn hoard<I>(options: &HoardOptions, loot: I) -> Hoarder
where
    I: IntoIterator,
    I::Item: Into<Loot>,
{
    let fresh = Hoarder::build(loot);

    if options.should_replace_global() {
        install_global(&fresh).merge(&fresh);
    }

    match options.custom_hoarder() {
        Some(custom) => {
            custom.merge(&fresh);
            custom.clone()
        },
        None => fresh,
    }
}

fn target(hoarder: Option<&Hoarder>) -> &Hoarder {
    hoarder.unwrap_or_else(|| global())
}

/// Returns the `T` selected by `options` from `hoarder`, or from the global
/// hoarder when `hoarder` is `None`.
///
/// # Panics
///
/// Panics with an "is absent, not `T`" or "is `U`, not `T`" message if no
/// `T` can be produced. Use [`try_equip`] to handle that case.
pub fn equip<T: Any + Send + Sync>(options: &EquipOptions, hoarder: Option<&Hoarder>) -> Arc<T> {
    target(hoarder).equip::<T>(options)
}

/// Returns the unnamed `T` from the global hoarder's default inventory.
///
/// # Panics
///
/// Panics like [`equip`].
pub fn equip_default<T: Any + Send + Sync>() -> Arc<T> {
    equip::<T>(&EquipOptions::default(), None)
}

/// Fallible form of [`equip`].
pub fn try_equip<T: Any + Send + Sync>(
    options: &EquipOptions,
    hoarder: Option<&Hoarder>,
) -> Result<Arc<T>, EquipError> {
    target(hoarder).try_equip::<T>(options)
}

/// Returns a value declared to satisfy the capability set `C`.
///
/// # Panics
///
/// Panics like [`equip`].
pub fn equip_capability<C: ?Sized + Send + Sync + 'static>(
    options: &EquipOptions,
    hoarder: Option<&Hoarder>,
) -> Arc<C> {
    target(hoarder).equip_capability::<C>(options)
}

/// Fallible form of [`equip_capability`].
pub fn try_equip_capability<C: ?Sized + Send + Sync + 'static>(
    options: &EquipOptions,
    hoarder: Option<&Hoarder>,
) -> Result<Arc<C>, EquipError> {
    target(hoarder).try_equip_capability::<C>(options)
}

/// Wraps `thing` in an [`Item`] keyed by its type and `name`.
///
/// An empty `name` gives a plain registration under the type name.
pub fn remember_as(thing: Thing, name: &str) -> Item {
    let key = key::base_key(thing.type_key(), name);
    Item::new(thing, key)
}

/// Creates an empty inventory called `name`; the empty name is the default
/// inventory.
pub fn use_inventory(name: &str) -> Inventory {
    Inventory::new(name)
}
