//! Registry of named inventories and the typed lookup chain.
//!
//! A [`Hoarder`] maps inventory names to [`Inventory`] handles. Values enter
//! through [`Hoarder::build`], which folds a list of [`Loot`] into a fresh
//! registry, and leave through [`Hoarder::get`] or the typed `equip*`
//! conveniences.
//!
//! ## Lookup chain
//!
//! ```text
//!   get(T, inventory, item)
//!     │
//!     ├─ T function-shaped?            ──► None
//!     ├─ inventory missing?            ──► None
//!     ├─ exact   base_key(T, item)     ──► hit
//!     ├─ alias   alias_of(base_key)    ──► hit
//!     ├─ T = dyn Trait: first stored
//!     │  item declaring that trait     ──► hit
//!     └─────────────────────────────────► None
//! ```
//!
//! ## Construction
//!
//! Unnamed registrations land in the default inventory
//! ([`DEFAULT_INVENTORY`]) and overwrite each other. Named items also land
//! there under their alias and full key, but only when nothing else claimed
//! the key first. Inventories passed as loot are recreated in the new registry
//! and shadowed into the default inventory the same way.
//!
//! ## Thread Safety
//!
//! The inventory map sits behind a `parking_lot::RwLock`. `get` holds the
//! read lock for the whole chain. `merge` snapshots the source registry
//! before touching its own map, so no call ever holds two registry locks.

use std::any::Any;
use std::collections::hash_map::Entry;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;

use crate::builder::EquipOptions;
use crate::error::EquipError;
use crate::inventory::Inventory;
use crate::item::Item;
use crate::key::{self, Shape, TypeKey};
#[cfg(feature = "metrics")]
use crate::metrics::{
    EquipMetrics, EquipMetricsRecorder, EquipMetricsSnapshot, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::thing::Thing;

/// Name of the inventory that receives every registration.
pub const DEFAULT_INVENTORY: &str = "";

/// One input to [`Hoarder::build`].
#[derive(Debug, Clone, Default)]
pub enum Loot {
    /// Placeholder; skipped.
    #[default]
    Nothing,
    /// A value registered under its type name.
    Thing(Thing),
    /// A value registered under a custom name.
    Item(Item),
    /// A whole inventory, recreated under its own name.
    Inventory(Inventory),
}

impl From<Thing> for Loot {
    fn from(thing: Thing) -> Self {
        Loot::Thing(thing)
    }
}

impl From<Item> for Loot {
    fn from(item: Item) -> Self {
        Loot::Item(item)
    }
}

impl From<Inventory> for Loot {
    fn from(inventory: Inventory) -> Self {
        Loot::Inventory(inventory)
    }
}

impl From<&Inventory> for Loot {
    fn from(inventory: &Inventory) -> Self {
        Loot::Inventory(inventory.clone())
    }
}

impl<L: Into<Loot>> From<Option<L>> for Loot {
    fn from(loot: Option<L>) -> Self {
        loot.map_or(Loot::Nothing, Into::into)
    }
}

/// Builds a `Vec<Loot>` from anything convertible into [`Loot`].
///
/// ```
/// use hoardkit::equip::remember_as;
/// use hoardkit::hoarder::{Hoarder, Loot};
/// use hoardkit::loot;
/// use hoardkit::thing::Thing;
///
/// let loot: Vec<Loot> = loot![Thing::new(1u8), remember_as(Thing::new(2u8), "two")];
/// let hoarder = Hoarder::build(loot);
/// assert!(hoarder.inventory("").is_some());
/// ```
#[macro_export]
macro_rules! loot {
    () => {
        ::std::vec::Vec::<$crate::hoarder::Loot>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::hoarder::Loot::from($item)),+]
    };
}

struct HoarderInner {
    inventories: RwLock<FxHashMap<String, Inventory>>,
    #[cfg(feature = "metrics")]
    metrics: EquipMetrics,
}

/// Registry of named inventories.
///
/// `Hoarder` is a handle: [`Clone`] shares the registry.
#[derive(Clone)]
pub struct Hoarder {
    inner: Arc<HoarderInner>,
}

impl Hoarder {
    /// Creates a registry holding only an empty default inventory.
    pub fn new() -> Self {
        let mut inventories = FxHashMap::default();
        inventories.insert(
            DEFAULT_INVENTORY.to_owned(),
            Inventory::new(DEFAULT_INVENTORY),
        );
        Self {
            inner: Arc::new(HoarderInner {
                inventories: RwLock::new(inventories),
                #[cfg(feature = "metrics")]
                metrics: EquipMetrics::default(),
            }),
        }
    }

    /// Folds `loot` into a fresh registry.
    ///
    /// Inputs are processed in order:
    /// - [`Loot::Thing`]: stored in the default inventory under its type name,
    ///   overwriting earlier values of the same type.
    /// - [`Loot::Item`]: its type key is claimed in the default inventory only
    ///   if unclaimed; for named items the alias and full key are then written
    ///   there too.
    /// - [`Loot::Inventory`]: every item is written into a same-named inventory
    ///   under its type key, alias and full key, and offered to the default
    ///   inventory without overwriting anything.
    ///
    /// Function-shaped values are skipped. Two inventory inputs with the same
    /// name fill the same inventory.
    pub fn build<I>(loot: I) -> Hoarder
    where
        I: IntoIterator,
        I::Item: Into<Loot>,
    {
        let hoarder = Hoarder::new();
        let default = hoarder.inventory_or_insert(DEFAULT_INVENTORY);

        let (mut things, mut items, mut inventories) = (0usize, 0usize, 0usize);
        for piece in loot {
            match piece.into() {
                Loot::Nothing => {},
                Loot::Thing(thing) => {
                    let name = key::type_name(thing.type_key());
                    if name.is_empty() {
                        tracing::trace!(
                            ty = thing.type_name(),
                            "skipped function-shaped loot"
                        );
                        continue;
                    }
                    default.put(Item::new(thing, name));
                    things += 1;
                },
                Loot::Item(item) => {
                    if Self::shelve_item(&default, &item) {
                        items += 1;
                    }
                },
                Loot::Inventory(source) => {
                    let target = hoarder.inventory_or_insert(source.name());
                    for (_, item) in source.loadout() {
                        Self::shelve_inventory_item(&default, &target, &item);
                    }
                    inventories += 1;
                },
            }
        }

        tracing::debug!(things, items, inventories, "built hoarder");
        hoarder
    }

    fn shelve_item(default: &Inventory, item: &Item) -> bool {
        let full = item.name();
        let original = key::original_of(full);
        if original.is_empty() {
            tracing::trace!(ty = item.value().type_name(), "skipped function-shaped item");
            return false;
        }

        default.put_if_absent(rekey(item, original));
        let alias = key::alias_of(full);
        if !alias.is_empty() {
            default.put(rekey(item, alias)).put(item.clone());
        }
        true
    }

    fn shelve_inventory_item(default: &Inventory, target: &Inventory, item: &Item) {
        let full = item.name();
        let original = key::original_of(full);
        if original.is_empty() {
            tracing::trace!(
                inventory = target.name(),
                ty = item.value().type_name(),
                "skipped function-shaped item"
            );
            return;
        }

        let by_type = rekey(item, original);
        default.put_if_absent(by_type.clone());
        target.put(by_type);

        let alias = key::alias_of(full);
        if !alias.is_empty() {
            let by_alias = rekey(item, alias);
            default
                .put_if_absent(by_alias.clone())
                .put_if_absent(item.clone());
            target.put(by_alias).put(item.clone());
        }
    }

    fn inventory_or_insert(&self, name: &str) -> Inventory {
        if let Some(existing) = self.inner.inventories.read().get(name) {
            return existing.clone();
        }
        self.inner
            .inventories
            .write()
            .entry(name.to_owned())
            .or_insert_with(|| Inventory::new(name))
            .clone()
    }

    /// Returns the inventory called `name`, if present.
    pub fn inventory(&self, name: &str) -> Option<Inventory> {
        self.inner.inventories.read().get(name).cloned()
    }

    /// Returns the number of inventories, the default one included.
    pub fn inventory_count(&self) -> usize {
        self.inner.inventories.read().len()
    }

    /// Walks the lookup chain for `type_key` in `inventory_name`.
    ///
    /// Returns `None` for function-shaped types, unknown inventories and
    /// misses. The registry read lock is held for the whole chain.
    pub fn get(&self, type_key: &TypeKey, inventory_name: &str, item_name: &str) -> Option<Thing> {
        if !type_key.is_supported() {
            tracing::trace!(requested = type_key.qualified_name(), "unsupported lookup");
            #[cfg(feature = "metrics")]
            self.inner.metrics.record_unsupported();
            return None;
        }

        let inventories = self.inner.inventories.read();
        let found = inventories
            .get(inventory_name)
            .and_then(|inventory| self.walk_chain(inventory, type_key, item_name));

        if found.is_none() {
            tracing::debug!(
                requested = type_key.qualified_name(),
                inventory = inventory_name,
                item = item_name,
                "lookup missed"
            );
            #[cfg(feature = "metrics")]
            self.inner.metrics.record_miss();
        }
        found
    }

    fn walk_chain(
        &self,
        inventory: &Inventory,
        type_key: &TypeKey,
        item_name: &str,
    ) -> Option<Thing> {
        let full = key::base_key(type_key, item_name);
        if let Some(item) = inventory.get(&full) {
            #[cfg(feature = "metrics")]
            self.inner.metrics.record_exact_hit();
            return Some(item.value().clone());
        }

        let alias = key::alias_of(&full);
        if !alias.is_empty() {
            if let Some(item) = inventory.get(alias) {
                #[cfg(feature = "metrics")]
                self.inner.metrics.record_alias_hit();
                return Some(item.value().clone());
            }
        }

        if type_key.shape() == Shape::Capability {
            let id = type_key.id();
            if let Some((_, item)) = inventory
                .loadout()
                .find(|(_, item)| item.value().satisfies(id))
            {
                #[cfg(feature = "metrics")]
                self.inner.metrics.record_capability_hit();
                return Some(item.value().clone());
            }
        }

        None
    }

    /// Looks up `T` and returns it, or why it could not.
    pub fn try_equip<T: Any + Send + Sync>(
        &self,
        options: &EquipOptions,
    ) -> Result<Arc<T>, EquipError> {
        let type_key = TypeKey::of::<T>();
        let thing = self
            .get(&type_key, options.inventory_name(), options.item_name())
            .ok_or_else(|| not_found(&type_key, options))?;
        thing.downcast::<T>().ok_or(EquipError::TypeMismatch {
            requested: type_key.qualified_name(),
            found: thing.type_name(),
        })
    }

    /// Looks up `T`.
    ///
    /// # Panics
    ///
    /// Panics with the [`EquipError`] message if no `T` can be produced.
    pub fn equip<T: Any + Send + Sync>(&self, options: &EquipOptions) -> Arc<T> {
        match self.try_equip::<T>(options) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Looks up a value declared to satisfy the capability set `C`.
    pub fn try_equip_capability<C: ?Sized + Send + Sync + 'static>(
        &self,
        options: &EquipOptions,
    ) -> Result<Arc<C>, EquipError> {
        let type_key = TypeKey::of::<C>();
        let thing = self
            .get(&type_key, options.inventory_name(), options.item_name())
            .ok_or_else(|| not_found(&type_key, options))?;
        thing.capability::<C>().ok_or(EquipError::TypeMismatch {
            requested: type_key.qualified_name(),
            found: thing.type_name(),
        })
    }

    /// Looks up a value declared to satisfy the capability set `C`.
    ///
    /// # Panics
    ///
    /// Panics with the [`EquipError`] message if nothing qualifies.
    pub fn equip_capability<C: ?Sized + Send + Sync + 'static>(
        &self,
        options: &EquipOptions,
    ) -> Arc<C> {
        match self.try_equip_capability::<C>(options) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns a lazy walk over `(name, inventory)` pairs in no particular
    /// order. Holds the registry read lock from the first pull until the walk
    /// is exhausted or dropped.
    pub fn loadout(&self) -> InventoryLoadout<'_> {
        InventoryLoadout {
            lock: &self.inner.inventories,
            guard: None,
            names: Vec::new(),
            position: 0,
            started: false,
        }
    }

    /// Folds `other` into `self`.
    ///
    /// Inventories missing here are adopted as shared handles; inventories
    /// present in both are merged with [`Inventory::merge`]. `None`, or
    /// `other` being this very registry, is a no-op.
    pub fn merge<'a>(&self, other: impl Into<Option<&'a Hoarder>>) -> &Self {
        let Some(other) = other.into() else {
            return self;
        };
        if self.ptr_eq(other) {
            return self;
        }

        let incoming: Vec<(String, Inventory)> = other
            .inner
            .inventories
            .read()
            .iter()
            .map(|(name, inventory)| (name.clone(), inventory.clone()))
            .collect();

        let mut overlapping = Vec::new();
        let mut adopted = 0usize;
        {
            let mut inventories = self.inner.inventories.write();
            for (name, inventory) in incoming {
                match inventories.entry(name) {
                    Entry::Vacant(slot) => {
                        slot.insert(inventory);
                        adopted += 1;
                    },
                    Entry::Occupied(slot) => overlapping.push((slot.get().clone(), inventory)),
                }
            }
        }

        let merged = overlapping.len();
        for (existing, inventory) in overlapping {
            existing.merge(&inventory);
        }

        tracing::debug!(adopted, merged, "merged hoarder");
        self
    }

    /// Returns `true` if both handles refer to the same registry.
    pub fn ptr_eq(&self, other: &Hoarder) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns a snapshot of the lookup counters.
    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> EquipMetricsSnapshot {
        self.inner
            .metrics
            .snapshot_with(self.inner.inventories.read().len())
    }

    /// Validates every inventory and the name index (debug-only).
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError> {
        use crate::error::InvariantError;

        let inventories = self.inner.inventories.read();
        if !inventories.contains_key(DEFAULT_INVENTORY) {
            return Err(InvariantError::new("hoarder has no default inventory"));
        }
        for (name, inventory) in inventories.iter() {
            if name != inventory.name() {
                return Err(InvariantError::new(format!(
                    "inventory {:?} indexed under {:?}",
                    inventory.name(),
                    name
                )));
            }
            inventory.check_invariants()?;
        }
        Ok(())
    }
}

impl Default for Hoarder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Hoarder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inventories = self.inner.inventories.read();
        let mut names: Vec<&str> = inventories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Hoarder").field("inventories", &names).finish()
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<EquipMetricsSnapshot> for Hoarder {
    fn snapshot(&self) -> EquipMetricsSnapshot {
        self.metrics()
    }
}

#[cfg(feature = "metrics")]
impl MetricsReset for Hoarder {
    fn reset_metrics(&self) {
        self.inner.metrics.reset_metrics();
    }
}

fn rekey(item: &Item, key: &str) -> Item {
    Item::new(item.value().clone(), key)
}

fn not_found(type_key: &TypeKey, options: &EquipOptions) -> EquipError {
    EquipError::NotFound {
        requested: type_key.qualified_name(),
        inventory: options.inventory_name().to_owned(),
        item: options.item_name().to_owned(),
    }
}

/// Lazy, finite walk over a [`Hoarder`]'s inventories.
pub struct InventoryLoadout<'a> {
    lock: &'a RwLock<FxHashMap<String, Inventory>>,
    guard: Option<RwLockReadGuard<'a, FxHashMap<String, Inventory>>>,
    names: Vec<String>,
    position: usize,
    started: bool,
}

impl Iterator for InventoryLoadout<'_> {
    type Item = (String, Inventory);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            let guard = self.lock.read();
            self.names = guard.keys().cloned().collect();
            self.guard = Some(guard);
        }

        let guard = self.guard.as_ref()?;
        while let Some(name) = self.names.get(self.position) {
            self.position += 1;
            if let Some(inventory) = guard.get(name) {
                return Some((name.clone(), inventory.clone()));
            }
        }
        self.guard = None;
        None
    }
}

impl FusedIterator for InventoryLoadout<'_> {}

impl fmt::Debug for InventoryLoadout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryLoadout")
            .field("position", &self.position)
            .field("holding_lock", &self.guard.is_some())
            .finish()
    }
}
