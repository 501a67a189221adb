//! hoardkit: type-indexed object registry. Hoard values once, equip them by
//! type anywhere.
//!
//! Values are registered into a [`Hoarder`](hoarder::Hoarder) (the
//! process-wide one by default) and retrieved by static type, optionally
//! narrowed by an item name and an inventory name. Trait objects are resolved
//! through capabilities declared at registration time.
//!
//! ```
//! use hoardkit::prelude::*;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".into()
//!     }
//! }
//!
//! hoard(
//!     &HoardOptions::new(),
//!     loot![
//!         Thing::new(42u32),
//!         Thing::new(English).implementing::<English, dyn Greeter>(|v| v),
//!     ],
//! );
//!
//! assert_eq!(*equip_default::<u32>(), 42);
//! let greeter = equip_capability::<dyn Greeter>(&EquipOptions::new(), None);
//! assert_eq!(greeter.greet(), "hello");
//! ```

pub mod builder;
pub mod ds;
pub mod equip;
pub mod error;
pub mod global;
pub mod hoarder;
pub mod inventory;
pub mod item;
pub mod key;
pub mod thing;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use crate::builder::{EquipOptions, HoardOptions};
pub use crate::equip::{
    equip, equip_capability, equip_default, hoard, remember_as, try_equip, try_equip_capability,
    use_inventory,
};
pub use crate::error::{EquipError, InvariantError};
pub use crate::hoarder::{DEFAULT_INVENTORY, Hoarder, Loot};
pub use crate::inventory::Inventory;
pub use crate::item::Item;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::EquipMetricsSnapshot;
pub use crate::thing::Thing;
