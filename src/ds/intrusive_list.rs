//! Doubly linked list backed by `SlotArena`, ordered oldest write first.
//!
//! Nodes are linked by `SlotId` instead of pointers, which gives stable
//! handles and O(1) `move_to_back`, the operation an inventory performs on
//! every overwrite.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                 │
//!   ├────────┼────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) } │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 } │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None } │
//!   └────────┴────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!           oldest                    newest
//! ```
//!
//! ## Operations
//! - `push_back(value)`: append at the tail
//! - `move_to_back(id)`: detach + attach to tail
//! - `front_id` / `next_id`: cursor walk for callers that hold the list
//!   behind a lock guard and cannot borrow an iterator across pulls
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Linked list that stores nodes in a `SlotArena` and links them via `SlotId`.
#[derive(Debug, Clone)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the SlotId at the front (oldest) of the list.
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the SlotId following `id`, if any.
    pub fn next_id(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).and_then(|node| node.next)
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            current: self.head,
        }
    }

    /// Inserts a new node at the back and returns its `SlotId`.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail.and_then(|tail| self.arena.get_mut(tail)) {
            Some(node) => node.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Moves an existing node to the back; returns `false` if `id` is not present.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.tail {
            return true;
        }
        self.detach(id);
        self.attach_back(id);
        true
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev.and_then(|prev_id| self.arena.get_mut(prev_id)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }

        match next.and_then(|next_id| self.arena.get_mut(next_id)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }

        Some(())
    }

    fn attach_back(&mut self, id: SlotId) -> Option<()> {
        let old_tail = self.tail;
        let node = self.arena.get_mut(id)?;
        node.next = None;
        node.prev = old_tail;
        match old_tail.and_then(|tail| self.arena.get_mut(tail)) {
            Some(tail_node) => tail_node.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        Some(())
    }

    /// Walks the links front to back and panics on any broken back-link,
    /// cycle, or length mismatch.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            let Some(node) = self.arena.get(id) else {
                panic!("list links to missing slot {id:?}");
            };
            assert_eq!(node.prev, prev, "broken back-link at {id:?}");
            if node.next.is_none() {
                assert_eq!(self.tail, Some(id), "tail is not the last node");
            }

            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle in list links");
        }

        assert_eq!(count, self.len());
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values from front to back.
pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}
