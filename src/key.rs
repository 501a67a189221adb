//! Key encoding for hoarded values.
//!
//! Every value lives in an [`Inventory`](crate::inventory::Inventory) under a
//! string key derived from its Rust type and an optional item name.
//!
//! ## Layout
//!
//! ```text
//!   base key  = type name                       (no item name)
//!             = type name "\n" escaped(name)    (named)
//!
//!   "my_app::Service\nprimary"
//!    ^^^^^^^^^^^^^^^ ^^^^^^^
//!    original_of     alias_of
//! ```
//!
//! Item names are escaped (`\` → `\\`, newline → `\n`) before they are
//! appended, so the first newline of a key is always the separator. Rust type
//! names never contain a newline.
//!
//! ## Shapes
//!
//! - [`Shape::Concrete`]: ordinary sized types, references, smart pointers.
//! - [`Shape::Capability`]: `dyn Trait` targets, resolved by capability scan.
//! - [`Shape::Function`]: fn pointers, closures and `dyn Fn*`. Unsupported:
//!   their type name is empty and they are skipped on registration and absent
//!   on retrieval.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

/// Separator between the type name and the item name in a key.
pub const KEY_SEPARATOR: char = '\n';

/// How a type takes part in lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A concrete type matched by key or alias only.
    Concrete,
    /// A `dyn Trait` capability set; lookups may fall back to a scan.
    Capability,
    /// A function-shaped type; never stored, never found.
    Function,
}

/// Runtime descriptor of a static type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    shape: Shape,
}

impl TypeKey {
    /// Describes `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        let name = std::any::type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            name,
            shape: shape_of(name),
        }
    }

    /// Returns the `TypeId` of the described type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified type name, including reference markers.
    ///
    /// This is the raw name even for function shapes; use [`type_name`] for
    /// the key form.
    pub fn qualified_name(&self) -> &'static str {
        self.name
    }

    /// Returns the lookup shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns `true` unless the type is function-shaped.
    pub fn is_supported(&self) -> bool {
        self.shape != Shape::Function
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeKey")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn shape_of(name: &str) -> Shape {
    let mut inner = name;
    loop {
        let stripped = inner
            .strip_prefix("&mut ")
            .or_else(|| inner.strip_prefix('&'))
            .or_else(|| inner.strip_prefix("*const "))
            .or_else(|| inner.strip_prefix("*mut "));
        match stripped {
            Some(rest) => inner = rest,
            None => break,
        }
    }

    let function = inner.starts_with("fn(")
        || inner.starts_with("unsafe ")
        || inner.starts_with("extern ")
        || inner.starts_with("for<")
        || inner.ends_with("{{closure}}")
        || is_fn_trait_object(inner);

    if function {
        Shape::Function
    } else if inner.len() == name.len() && inner.starts_with("dyn ") {
        Shape::Capability
    } else {
        Shape::Concrete
    }
}

fn is_fn_trait_object(name: &str) -> bool {
    let Some(rest) = name.strip_prefix("dyn ") else {
        return false;
    };
    ["core::ops::function::Fn", "Fn(", "FnMut(", "FnOnce("]
        .iter()
        .any(|prefix| rest.starts_with(prefix))
}

/// Returns the key form of `key`'s type name; empty for function shapes.
pub fn type_name(key: &TypeKey) -> &'static str {
    if key.is_supported() { key.name } else { "" }
}

/// Escapes an item name so it can never contain the key separator.
pub fn escape_name(name: &str) -> Cow<'_, str> {
    if !name.contains(['\\', KEY_SEPARATOR]) {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            KEY_SEPARATOR => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Builds the lookup key for a type and an optional item name.
///
/// Returns an empty string for function shapes.
pub fn base_key(key: &TypeKey, item_name: &str) -> String {
    let type_name = type_name(key);
    if type_name.is_empty() {
        return String::new();
    }
    if item_name.is_empty() {
        return type_name.to_owned();
    }
    let escaped = escape_name(item_name);
    let mut out = String::with_capacity(type_name.len() + 1 + escaped.len());
    out.push_str(type_name);
    out.push(KEY_SEPARATOR);
    out.push_str(&escaped);
    out
}

/// Returns everything after the first separator, or `""`.
pub fn alias_of(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR)
        .map(|(_, alias)| alias)
        .unwrap_or("")
}

/// Returns everything before the first separator.
pub fn original_of(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR)
        .map(|(original, _)| original)
        .unwrap_or(key)
}
