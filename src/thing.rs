//! Type-erased hoarded values.
//!
//! A [`Thing`] owns one reference-counted value together with the capability
//! sets (`dyn Trait` targets) it was declared to satisfy when it was built.
//! Capability casts are computed once, at registration time, so a later
//! capability lookup is a table probe rather than a runtime trait check.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use hoardkit::thing::Thing;
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
//! let thing = Thing::new(English).implementing::<English, dyn Greeter>(|v| v);
//! let greeter: Arc<dyn Greeter> = thing.capability::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "hello");
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::key::TypeKey;

#[derive(Clone)]
struct CapabilityEntry {
    name: &'static str,
    // Holds an `Arc<C>` for the capability `C`.
    cast: Arc<dyn Any + Send + Sync>,
}

/// A hoarded value plus the capability sets it satisfies.
///
/// Cloning a `Thing` shares the underlying value.
#[derive(Clone)]
pub struct Thing {
    value: Arc<dyn Any + Send + Sync>,
    type_key: TypeKey,
    capabilities: Arc<FxHashMap<TypeId, CapabilityEntry>>,
}

impl Thing {
    /// Wraps `value`.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::shared(Arc::new(value))
    }

    /// Wraps an already shared value without adding another layer of `Arc`.
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_key: TypeKey::of::<T>(),
            capabilities: Arc::new(FxHashMap::default()),
        }
    }

    /// Declares that the value satisfies the capability set `C`.
    ///
    /// `cast` receives the value as `Arc<T>` and returns it as `Arc<C>`,
    /// usually just `|v| v`. If `T` is not the stored type the declaration is
    /// ignored.
    pub fn implementing<T, C>(mut self, cast: impl FnOnce(Arc<T>) -> Arc<C>) -> Self
    where
        T: Any + Send + Sync,
        C: ?Sized + Send + Sync + 'static,
    {
        let concrete = match Arc::clone(&self.value).downcast::<T>() {
            Ok(concrete) => concrete,
            Err(_) => {
                tracing::debug!(
                    stored = self.type_key.qualified_name(),
                    requested = std::any::type_name::<T>(),
                    "capability cast ignored: value type differs"
                );
                return self;
            },
        };
        let entry = CapabilityEntry {
            name: std::any::type_name::<C>(),
            cast: Arc::new(cast(concrete)),
        };
        Arc::make_mut(&mut self.capabilities).insert(TypeId::of::<C>(), entry);
        self
    }

    /// Returns the runtime descriptor of the stored value's type.
    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    /// Returns the qualified name of the stored value's type.
    pub fn type_name(&self) -> &'static str {
        self.type_key.qualified_name()
    }

    /// Returns `false` for function-shaped values.
    pub fn is_supported(&self) -> bool {
        self.type_key.is_supported()
    }

    /// Returns `true` if the value was declared to satisfy the capability
    /// with the given `TypeId`.
    pub fn satisfies(&self, capability: TypeId) -> bool {
        self.capabilities.contains_key(&capability)
    }

    /// Returns the names of the declared capability sets.
    pub fn capability_names(&self) -> Vec<&'static str> {
        self.capabilities.values().map(|entry| entry.name).collect()
    }

    /// Returns the value as `Arc<T>` if it is a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Returns the value as `Arc<C>` if it satisfies the capability set `C`.
    pub fn capability<C: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<C>> {
        self.capabilities
            .get(&TypeId::of::<C>())
            .and_then(|entry| entry.cast.downcast_ref::<Arc<C>>())
            .cloned()
    }

    /// Returns `true` if both handles share the same value.
    pub fn ptr_eq(&self, other: &Thing) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thing")
            .field("type", &self.type_key.qualified_name())
            .field("capabilities", &self.capability_names())
            .finish()
    }
}
