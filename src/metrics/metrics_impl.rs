use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::EquipMetricsSnapshot;
use crate::metrics::traits::{EquipMetricsRecorder, MetricsReset};

/// Lookup counters owned by one hoarder.
#[derive(Debug, Default)]
pub struct EquipMetrics {
    pub lookups: AtomicU64,
    pub exact_hits: AtomicU64,
    pub alias_hits: AtomicU64,
    pub capability_hits: AtomicU64,
    pub misses: AtomicU64,
    pub unsupported: AtomicU64,
}

impl EquipMetrics {
    /// Copies the counters; `inventories` is the gauge captured by the caller.
    pub fn snapshot_with(&self, inventories: usize) -> EquipMetricsSnapshot {
        EquipMetricsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            exact_hits: self.exact_hits.load(Ordering::Relaxed),
            alias_hits: self.alias_hits.load(Ordering::Relaxed),
            capability_hits: self.capability_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            unsupported: self.unsupported.load(Ordering::Relaxed),
            inventories,
        }
    }

    #[inline]
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl EquipMetricsRecorder for EquipMetrics {
    fn record_exact_hit(&self) {
        Self::bump(&self.lookups);
        Self::bump(&self.exact_hits);
    }

    fn record_alias_hit(&self) {
        Self::bump(&self.lookups);
        Self::bump(&self.alias_hits);
    }

    fn record_capability_hit(&self) {
        Self::bump(&self.lookups);
        Self::bump(&self.capability_hits);
    }

    fn record_miss(&self) {
        Self::bump(&self.lookups);
        Self::bump(&self.misses);
    }

    fn record_unsupported(&self) {
        Self::bump(&self.lookups);
        Self::bump(&self.unsupported);
    }
}

impl MetricsReset for EquipMetrics {
    fn reset_metrics(&self) {
        for counter in [
            &self.lookups,
            &self.exact_hits,
            &self.alias_hits,
            &self.capability_hits,
            &self.misses,
            &self.unsupported,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_outcome_counts_as_a_lookup() {
        let metrics = EquipMetrics::default();
        metrics.record_exact_hit();
        metrics.record_alias_hit();
        metrics.record_capability_hit();
        metrics.record_miss();
        metrics.record_unsupported();

        let snapshot = metrics.snapshot_with(2);
        assert_eq!(snapshot.lookups, 5);
        assert_eq!(snapshot.hits(), 3);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.unsupported, 1);
        assert_eq!(snapshot.inventories, 2);
    }

    #[test]
    fn reset_zeroes_counters() {
        let metrics = EquipMetrics::default();
        metrics.record_exact_hit();
        metrics.record_miss();
        metrics.reset_metrics();
        assert_eq!(metrics.snapshot_with(0), EquipMetricsSnapshot::default());
    }
}
