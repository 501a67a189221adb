//! Named holder of one hoarded value.

use std::fmt;
use std::sync::Arc;

use crate::thing::Thing;

struct ItemInner {
    key: String,
    thing: Thing,
}

/// A [`Thing`] stored under a key.
///
/// Immutable after construction. Cloning an `Item` shares it; the value is
/// never copied. Build one with [`remember_as`](crate::equip::remember_as).
#[derive(Clone)]
pub struct Item {
    inner: Arc<ItemInner>,
}

impl Item {
    pub(crate) fn new(thing: Thing, key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ItemInner {
                key: key.into(),
                thing,
            }),
        }
    }

    /// Returns the key this item is stored under.
    pub fn name(&self) -> &str {
        &self.inner.key
    }

    /// Returns the held value.
    pub fn value(&self) -> &Thing {
        &self.inner.thing
    }

    /// Returns `true` if both handles point at the same item.
    pub fn ptr_eq(&self, other: &Item) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.inner.key)
            .field("type", &self.inner.thing.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_exposes_key_and_value() {
        let item = Item::new(Thing::new(5u8), "u8\nfive");
        assert_eq!(item.name(), "u8\nfive");
        assert_eq!(*item.value().downcast::<u8>().unwrap(), 5);
    }

    #[test]
    fn clones_share_the_item() {
        let item = Item::new(Thing::new("x"), "&str");
        let copy = item.clone();
        assert!(copy.ptr_eq(&item));
        assert!(copy.value().ptr_eq(item.value()));
    }
}
