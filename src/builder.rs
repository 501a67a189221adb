//! Option builders for [`hoard`](crate::equip::hoard) and the `equip*`
//! functions.
//!
//! ## Example
//!
//! ```rust
//! use hoardkit::builder::{EquipOptions, HoardOptions};
//! use hoardkit::equip::hoard;
//! use hoardkit::hoarder::Hoarder;
//! use hoardkit::loot;
//! use hoardkit::thing::Thing;
//!
//! let private = Hoarder::new();
//! let options = HoardOptions::new()
//!     .with_should_replace_global(false)
//!     .with_custom_hoarder(&private);
//! let returned = hoard(&options, loot![Thing::new(5u8)]);
//! assert!(returned.ptr_eq(&private));
//!
//! let value = private.equip::<u8>(&EquipOptions::new());
//! assert_eq!(*value, 5);
//! ```

use crate::hoarder::Hoarder;

/// Options for [`hoard`](crate::equip::hoard).
///
/// Defaults: merge into the global hoarder, no custom hoarder.
#[derive(Debug, Clone)]
pub struct HoardOptions {
    should_replace_global: bool,
    custom_hoarder: Option<Hoarder>,
}

impl HoardOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the registration is merged into the global hoarder.
    pub fn with_should_replace_global(mut self, should_replace_global: bool) -> Self {
        self.should_replace_global = should_replace_global;
        self
    }

    /// Merges the registration into `hoarder` and returns it from `hoard`.
    pub fn with_custom_hoarder(mut self, hoarder: &Hoarder) -> Self {
        self.custom_hoarder = Some(hoarder.clone());
        self
    }

    /// Whether `hoard` merges into the global hoarder (default `true`).
    pub fn should_replace_global(&self) -> bool {
        self.should_replace_global
    }

    /// The hoarder `hoard` merges into and returns, if one was set.
    pub fn custom_hoarder(&self) -> Option<&Hoarder> {
        self.custom_hoarder.as_ref()
    }
}

impl Default for HoardOptions {
    fn default() -> Self {
        Self {
            should_replace_global: true,
            custom_hoarder: None,
        }
    }
}

/// Options for the `equip*` functions.
///
/// Defaults: the default inventory, no item name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipOptions {
    custom_inventory_name: String,
    custom_item_name: String,
}

impl EquipOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks in the inventory called `name` instead of the default one.
    pub fn with_custom_inventory_name(mut self, name: impl Into<String>) -> Self {
        self.custom_inventory_name = name.into();
        self
    }

    /// Looks for the item registered under `name`.
    pub fn with_custom_item_name(mut self, name: impl Into<String>) -> Self {
        self.custom_item_name = name.into();
        self
    }

    /// Resolved inventory name; empty means the default inventory
    /// ([`DEFAULT_INVENTORY`](crate::hoarder::DEFAULT_INVENTORY)).
    pub fn inventory_name(&self) -> &str {
        &self.custom_inventory_name
    }

    /// Resolved item name; empty for plain registrations.
    pub fn item_name(&self) -> &str {
        &self.custom_item_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hoarder::DEFAULT_INVENTORY;

    #[test]
    fn hoard_defaults_replace_global() {
        let options = HoardOptions::new();
        assert!(options.should_replace_global());
        assert!(options.custom_hoarder().is_none());
    }

    #[test]
    fn hoard_setters_apply() {
        let hoarder = Hoarder::new();
        let options = HoardOptions::default()
            .with_should_replace_global(false)
            .with_custom_hoarder(&hoarder);
        assert!(!options.should_replace_global());
        assert!(options.custom_hoarder().unwrap().ptr_eq(&hoarder));
    }

    #[test]
    fn later_setter_wins() {
        let options = EquipOptions::new()
            .with_custom_item_name("first")
            .with_custom_item_name("second");
        assert_eq!(options.item_name(), "second");
    }

    #[test]
    fn equip_defaults_resolve_to_default_inventory() {
        let options = EquipOptions::new();
        assert_eq!(options.inventory_name(), DEFAULT_INVENTORY);
        assert_eq!(options.item_name(), "");

        let options = options.with_custom_inventory_name("services");
        assert_eq!(options.inventory_name(), "services");

        let options = options.with_custom_inventory_name(DEFAULT_INVENTORY);
        assert_eq!(options.inventory_name(), DEFAULT_INVENTORY);
        assert_eq!(options, EquipOptions::new());
    }
}
