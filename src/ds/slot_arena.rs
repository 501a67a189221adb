//! Append-only node storage addressed by [`SlotId`].
//!
//! Backs the [`IntrusiveList`](crate::ds::intrusive_list::IntrusiveList) that
//! keeps inventory order. Inventories never drop a key, and an overwrite
//! replaces the value in its existing slot, so slots are only ever added.

/// Stable handle to one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

/// Growable slot storage; a `SlotId` stays valid for the arena's lifetime.
#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    slots: Vec<T>,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        self.slots.push(value);
        SlotId(self.slots.len() - 1)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        id.0 < self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_hands_out_sequential_ids() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));
    }

    #[test]
    fn unknown_id_is_absent() {
        let arena: SlotArena<u8> = SlotArena::default();
        assert!(arena.is_empty());
        assert!(!arena.contains(SlotId(0)));
        assert_eq!(arena.get(SlotId(3)), None);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = SlotArena::new();
        let id = arena.insert(10);
        if let Some(v) = arena.get_mut(id) {
            *v = 20;
        }
        assert_eq!(arena.get(id), Some(&20));
        assert_eq!(arena.len(), 1);
    }
}
