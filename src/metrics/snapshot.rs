/// Point-in-time copy of a hoarder's lookup counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EquipMetricsSnapshot {
    pub lookups: u64,
    pub exact_hits: u64,
    pub alias_hits: u64,
    pub capability_hits: u64,
    pub misses: u64,
    pub unsupported: u64, // function-shaped requests, short-circuited before any lock

    // gauges captured at snapshot time
    pub inventories: usize,
}

impl EquipMetricsSnapshot {
    /// Lookups that produced a value through any step of the chain.
    pub fn hits(&self) -> u64 {
        self.exact_hits + self.alias_hits + self.capability_hits
    }

    /// Fraction of lookups that produced a value; `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits() as f64 / self.lookups as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_of_empty_snapshot_is_zero() {
        assert_eq!(EquipMetricsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn hits_sum_every_successful_step() {
        let snapshot = EquipMetricsSnapshot {
            lookups: 8,
            exact_hits: 3,
            alias_hits: 2,
            capability_hits: 1,
            misses: 1,
            unsupported: 1,
            inventories: 1,
        };
        assert_eq!(snapshot.hits(), 6);
        assert!((snapshot.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
