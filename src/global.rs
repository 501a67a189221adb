//! Process-wide default [`Hoarder`].
//!
//! The global hoarder is created at most once and never replaced; later
//! registrations are merged into it. The first call to [`install_global`]
//! adopts the given hoarder itself, so it shares state with the global from
//! then on.

use std::sync::OnceLock;

use crate::hoarder::Hoarder;

static GLOBAL: OnceLock<Hoarder> = OnceLock::new();

/// Returns the global hoarder, creating an empty one on first use.
pub fn global() -> &'static Hoarder {
    GLOBAL.get_or_init(|| {
        tracing::debug!("initialized empty global hoarder");
        Hoarder::new()
    })
}

/// Makes `hoarder` the global hoarder unless one already exists, then
/// returns the global hoarder.
pub fn install_global(hoarder: &Hoarder) -> &'static Hoarder {
    GLOBAL.get_or_init(|| {
        tracing::debug!("installed global hoarder");
        hoarder.clone()
    })
}

/// Returns `true` once the global hoarder exists.
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}
