//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting*, and *export* into small traits so
//! lookup instrumentation never leaks into registry logic.
//!
//! ## Architecture
//!
//! ```text
//!   Hoarder::get ──► EquipMetricsRecorder (&self, atomic counters)
//!                         │
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Recorders take `&self`: lookups run under a shared read lock, so counters
//! use interior mutability.

/// Outcome counters for the lookup fallback chain.
pub trait EquipMetricsRecorder {
    /// The exact key matched.
    fn record_exact_hit(&self);
    /// The alias key matched after the exact key missed.
    fn record_alias_hit(&self);
    /// A capability scan found a satisfying item.
    fn record_capability_hit(&self);
    /// The whole chain came up empty.
    fn record_miss(&self);
    /// A function-shaped type was requested.
    fn record_unsupported(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
