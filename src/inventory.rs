//! Ordered, keyed collection of hoarded items.
//!
//! An [`Inventory`] maps keys to [`Item`]s and remembers the order in which
//! keys were last written: new keys are appended, overwritten keys move to the
//! tail. That order drives the capability scan in
//! [`Hoarder::get`](crate::hoarder::Hoarder::get), where the earliest
//! satisfying entry wins.
//!
//! ## Architecture
//!
//! ```text
//!   Inventory (Arc handle, cloning shares)
//!   └── RwLock<InventoryState>
//!         index: FxHashMap<String, SlotId>      order: IntrusiveList<Item>
//!         ┌──────────────┬─────────┐           head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!         │ "u32"        │ id_1    │                 oldest write      newest write
//!         │ "u32\nport"  │ id_2    │
//!         └──────────────┴─────────┘
//! ```
//!
//! ## Operations
//! - `put(item)`: overwrite or insert, key moves to the tail
//! - `put_if_absent(item)`: insert only unseen keys, never reorders
//! - `merge(other)`: `put` every entry of `other`, in `other`'s order
//! - `loadout()`: lazy walk holding the read lock until exhausted or dropped
//!
//! ## Thread Safety
//! Every operation takes the inventory's own `RwLock`. A live
//! [`ItemLoadout`] keeps the read lock, so writers on the same inventory
//! wait until the consumer finishes or drops the iterator.
//!
//! ## Example Usage
//!
//! ```
//! use hoardkit::equip::{remember_as, use_inventory};
//! use hoardkit::thing::Thing;
//!
//! let inventory = use_inventory("ports");
//! inventory
//!     .put(remember_as(Thing::new(80u16), "http"))
//!     .put(remember_as(Thing::new(443u16), "https"));
//!
//! let keys: Vec<String> = inventory.loadout().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec!["u16\nhttp", "u16\nhttps"]);
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::item::Item;

#[derive(Debug, Clone, Default)]
struct InventoryState {
    order: IntrusiveList<Item>,
    index: FxHashMap<String, SlotId>,
}

impl InventoryState {
    fn put(&mut self, item: Item) {
        match self.index.get(item.name()).copied() {
            Some(id) => {
                if let Some(slot) = self.order.get_mut(id) {
                    *slot = item;
                }
                self.order.move_to_back(id);
            },
            None => {
                let key = item.name().to_owned();
                let id = self.order.push_back(item);
                self.index.insert(key, id);
            },
        }
    }

    fn put_if_absent(&mut self, item: Item) -> bool {
        if self.index.contains_key(item.name()) {
            return false;
        }
        let key = item.name().to_owned();
        let id = self.order.push_back(item);
        self.index.insert(key, id);
        true
    }

    fn get(&self, key: &str) -> Option<&Item> {
        self.index.get(key).and_then(|&id| self.order.get(id))
    }

    fn items(&self) -> Vec<Item> {
        self.order.iter().cloned().collect()
    }
}

struct InventoryInner {
    name: String,
    state: RwLock<InventoryState>,
}

/// Named, ordered collection of [`Item`]s.
///
/// `Inventory` is a handle: [`Clone`] shares the same collection, so a write
/// through one handle is visible through every other. Use
/// [`duplicate`](Self::duplicate) for an independent copy.
#[derive(Clone)]
pub struct Inventory {
    inner: Arc<InventoryInner>,
}

impl Inventory {
    /// Creates an empty inventory called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_state(name.into(), InventoryState::default())
    }

    fn from_state(name: String, state: InventoryState) -> Self {
        Self {
            inner: Arc::new(InventoryInner {
                name,
                state: RwLock::new(state),
            }),
        }
    }

    /// Returns the inventory name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Stores `item`, replacing any item with the same key and moving that
    /// key to the tail. `None` is a no-op.
    ///
    /// Returns `self` so calls can be chained.
    pub fn put(&self, item: impl Into<Option<Item>>) -> &Self {
        if let Some(item) = item.into() {
            self.inner.state.write().put(item);
        }
        self
    }

    /// Stores `item` only if its key is not present yet. Existing keys keep
    /// their position. `None` is a no-op.
    pub fn put_if_absent(&self, item: impl Into<Option<Item>>) -> &Self {
        if let Some(item) = item.into() {
            self.inner.state.write().put_if_absent(item);
        }
        self
    }

    /// Returns the item stored under exactly `key`.
    pub fn get(&self, key: &str) -> Option<Item> {
        self.inner.state.read().get(key).cloned()
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.state.read().index.contains_key(key)
    }

    /// Returns the number of stored items.
    pub fn len(&self) -> usize {
        self.inner.state.read().order.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.state.read().order.is_empty()
    }

    /// Returns the keys in order, oldest write first.
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .state
            .read()
            .order
            .iter()
            .map(|item| item.name().to_owned())
            .collect()
    }

    /// Writes every entry of `other` into `self`, in `other`'s order.
    ///
    /// Each merged key is overwritten and moved to the tail, so keys merged
    /// later in the call end up after keys merged earlier. `None`, or `other`
    /// being this very inventory, is a no-op.
    ///
    /// `other` is read into a snapshot under its read lock before `self` is
    /// locked for writing, so two inventories merging into each other from
    /// different threads cannot deadlock.
    pub fn merge<'a>(&self, other: impl Into<Option<&'a Inventory>>) -> &Self {
        let Some(other) = other.into() else {
            return self;
        };
        if self.ptr_eq(other) {
            return self;
        }

        let incoming = other.inner.state.read().items();
        if incoming.is_empty() {
            return self;
        }

        let mut state = self.inner.state.write();
        for item in incoming {
            state.put(item);
        }
        self
    }

    /// Returns a new inventory with the same name and the same entries in the
    /// same order. Items are shared, not copied.
    pub fn duplicate(&self) -> Inventory {
        let state = self.inner.state.read().clone();
        Self::from_state(self.inner.name.clone(), state)
    }

    /// Returns a lazy walk over `(key, item)` pairs in order.
    ///
    /// The read lock is taken on the first pull and held until the walk is
    /// exhausted or the iterator is dropped. Calling `loadout` again starts a
    /// fresh walk.
    pub fn loadout(&self) -> ItemLoadout<'_> {
        ItemLoadout {
            lock: &self.inner.state,
            guard: None,
            cursor: None,
            started: false,
        }
    }

    /// Returns `true` if both handles refer to the same inventory.
    pub fn ptr_eq(&self, other: &Inventory) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Validates that the order list and the key index agree (debug-only).
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError> {
        use crate::error::InvariantError;

        let state = self.inner.state.read();
        state.order.debug_validate_invariants();
        if state.index.len() != state.order.len() {
            return Err(InvariantError::new(format!(
                "inventory {:?}: index has {} keys but order has {}",
                self.inner.name,
                state.index.len(),
                state.order.len()
            )));
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for item in state.order.iter() {
            if !seen.insert(item.name()) {
                return Err(InvariantError::new(format!(
                    "inventory {:?}: duplicate key {:?} in order",
                    self.inner.name,
                    item.name()
                )));
            }
            match state.get(item.name()) {
                Some(indexed) if indexed.ptr_eq(item) => {},
                _ => {
                    return Err(InvariantError::new(format!(
                        "inventory {:?}: key {:?} not indexed to its slot",
                        self.inner.name,
                        item.name()
                    )));
                },
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("name", &self.inner.name)
            .field("keys", &self.keys())
            .finish()
    }
}

/// Lazy, finite walk over an [`Inventory`], oldest write first.
///
/// Holds the inventory's read lock from the first `next()` until the walk is
/// exhausted or the iterator is dropped.
pub struct ItemLoadout<'a> {
    lock: &'a RwLock<InventoryState>,
    guard: Option<RwLockReadGuard<'a, InventoryState>>,
    cursor: Option<SlotId>,
    started: bool,
}

impl ItemLoadout<'_> {
    /// Returns `true` while the iterator holds the read lock.
    pub fn is_holding_lock(&self) -> bool {
        self.guard.is_some()
    }
}

impl Iterator for ItemLoadout<'_> {
    type Item = (String, Item);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            let guard = self.lock.read();
            self.cursor = guard.order.front_id();
            self.guard = Some(guard);
        }

        let guard = self.guard.as_ref()?;
        let current = self
            .cursor
            .and_then(|id| guard.order.get(id).map(|item| (id, item.clone())));

        match current {
            Some((id, item)) => {
                self.cursor = guard.order.next_id(id);
                Some((item.name().to_owned(), item))
            },
            None => {
                self.guard = None;
                None
            },
        }
    }
}

impl FusedIterator for ItemLoadout<'_> {}

impl fmt::Debug for ItemLoadout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemLoadout")
            .field("started", &self.started)
            .field("holding_lock", &self.guard.is_some())
            .finish()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::thing::Thing;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Put(u8, i32),
        PutIfAbsent(u8, i32),
        Merge(Vec<(u8, i32)>),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..8, any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
            (0u8..8, any::<i32>()).prop_map(|(k, v)| Op::PutIfAbsent(k, v)),
            prop::collection::vec((0u8..8, any::<i32>()), 0..6).prop_map(Op::Merge),
        ]
    }

    fn item(k: u8, v: i32) -> Item {
        Item::new(Thing::new(v), format!("k{k}"))
    }

    // Reference model: Vec of (key, value), oldest write first.
    fn model_put(model: &mut Vec<(String, i32)>, key: String, value: i32) {
        model.retain(|(k, _)| *k != key);
        model.push((key, value));
    }

    proptest! {
        /// Property: order and values match a move-to-tail reference model
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(ops in prop::collection::vec(op(), 0..60)) {
            let inv = Inventory::new("prop");
            let mut model: Vec<(String, i32)> = Vec::new();

            for op in ops {
                match op {
                    Op::Put(k, v) => {
                        inv.put(item(k, v));
                        model_put(&mut model, format!("k{k}"), v);
                    },
                    Op::PutIfAbsent(k, v) => {
                        inv.put_if_absent(item(k, v));
                        let key = format!("k{k}");
                        if !model.iter().any(|(existing, _)| *existing == key) {
                            model.push((key, v));
                        }
                    },
                    Op::Merge(entries) => {
                        let other = Inventory::new("other");
                        for (k, v) in &entries {
                            other.put(item(*k, *v));
                        }
                        let other_order: Vec<(String, i32)> = other
                            .loadout()
                            .map(|(key, it)| (key, *it.value().downcast::<i32>().unwrap()))
                            .collect();
                        inv.merge(&other);
                        for (key, v) in other_order {
                            model_put(&mut model, key, v);
                        }
                    },
                }

                prop_assert!(inv.check_invariants().is_ok());
            }

            let actual: Vec<(String, i32)> = inv
                .loadout()
                .map(|(key, it)| (key, *it.value().downcast::<i32>().unwrap()))
                .collect();
            prop_assert_eq!(actual, model);
        }

        /// Property: stopping a walk early never disturbs later operations
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_partial_loadout_is_harmless(
            keys in prop::collection::vec(0u8..16, 1..30),
            stop in 0usize..30
        ) {
            let inv = Inventory::new("prop");
            for (i, k) in keys.iter().enumerate() {
                inv.put(item(*k, i as i32));
            }
            let before = inv.keys();
            let taken = inv.loadout().take(stop).count();
            prop_assert!(taken <= before.len());

            inv.put(item(200, -1));
            let mut expected = before;
            expected.push("k200".to_string());
            prop_assert_eq!(inv.keys(), expected);
        }
    }
}
