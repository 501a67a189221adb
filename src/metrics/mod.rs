//! Lookup instrumentation (feature `metrics`).

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::EquipMetrics;
pub use snapshot::EquipMetricsSnapshot;
pub use traits::{EquipMetricsRecorder, MetricsExporter, MetricsReset, MetricsSnapshotProvider};
