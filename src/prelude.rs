pub use crate::builder::{EquipOptions, HoardOptions};
pub use crate::equip::{
    equip, equip_capability, equip_default, hoard, remember_as, try_equip, try_equip_capability,
    use_inventory,
};
pub use crate::error::EquipError;
pub use crate::hoarder::{DEFAULT_INVENTORY, Hoarder, Loot};
pub use crate::inventory::Inventory;
pub use crate::item::Item;
pub use crate::key::TypeKey;
pub use crate::loot;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::EquipMetricsSnapshot;
pub use crate::thing::Thing;
