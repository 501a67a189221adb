//! Error types for the hoardkit library.
//!
//! ## Key Components
//!
//! - [`EquipError`]: Returned by the fallible `try_equip*` functions when the
//!   lookup chain finds nothing, or finds a value of another type.
//! - [`InvariantError`]: Returned when internal inventory invariants are
//!   violated (debug-only `check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use hoardkit::builder::EquipOptions;
//! use hoardkit::error::EquipError;
//! use hoardkit::hoarder::Hoarder;
//!
//! struct NeverHoarded;
//!
//! let hoarder = Hoarder::new();
//! let err = hoarder
//!     .try_equip::<NeverHoarded>(&EquipOptions::new())
//!     .err()
//!     .expect("nothing was hoarded");
//! assert!(matches!(err, EquipError::NotFound { .. }));
//! assert!(err.to_string().contains("not `"));
//! ```

use thiserror::Error;

/// Error returned when a typed retrieval cannot produce the requested type.
///
/// The panicking `equip*` functions panic with this error's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    /// Nothing matched through the whole lookup chain.
    #[error(
        "hoarded value is absent, not `{requested}` (inventory {inventory:?}, item {item:?})"
    )]
    NotFound {
        requested: &'static str,
        inventory: String,
        item: String,
    },
    /// A value matched by key or alias but has another type.
    #[error("hoarded value is `{found}`, not `{requested}`")]
    TypeMismatch {
        requested: &'static str,
        found: &'static str,
    },
}

impl EquipError {
    /// Returns the name of the type that was requested.
    pub fn requested(&self) -> &'static str {
        match self {
            EquipError::NotFound { requested, .. } | EquipError::TypeMismatch { requested, .. } => {
                requested
            },
        }
    }
}

/// Error returned when internal inventory invariants are violated.
///
/// Produced by debug-only `check_invariants` methods
/// (e.g. [`Inventory::check_invariants`](crate::inventory::Inventory::check_invariants)).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- EquipError -------------------------------------------------------

    #[test]
    fn not_found_names_requested_type() {
        let err = EquipError::NotFound {
            requested: "app::Service",
            inventory: String::new(),
            item: "primary".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("absent"));
        assert!(msg.contains("not `app::Service`"));
        assert!(msg.contains("\"primary\""));
        assert_eq!(err.requested(), "app::Service");
    }

    #[test]
    fn mismatch_names_both_types() {
        let err = EquipError::TypeMismatch {
            requested: "u32",
            found: "alloc::string::String",
        };
        assert_eq!(
            err.to_string(),
            "hoarded value is `alloc::string::String`, not `u32`"
        );
    }

    #[test]
    fn equip_error_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EquipError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("order length mismatch");
        assert_eq!(err.to_string(), "order length mismatch");
        assert_eq!(err.message(), "order length mismatch");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }
}
