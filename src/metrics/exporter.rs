use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::EquipMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for hoarder lookup snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<EquipMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &EquipMetricsSnapshot) {
        let counters = [
            ("equip_lookups_total", snapshot.lookups),
            ("equip_exact_hits_total", snapshot.exact_hits),
            ("equip_alias_hits_total", snapshot.alias_hits),
            ("equip_capability_hits_total", snapshot.capability_hits),
            ("equip_misses_total", snapshot.misses),
            ("equip_unsupported_total", snapshot.unsupported),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", &self.metric_name(suffix), value);
        }
        self.write_metric(
            "gauge",
            &self.metric_name("inventories"),
            snapshot.inventories as u64,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_prefixed_counters_and_gauge() {
        let exporter = PrometheusTextExporter::new("app", Vec::new());
        exporter.export(&EquipMetricsSnapshot {
            lookups: 4,
            exact_hits: 3,
            misses: 1,
            inventories: 2,
            ..Default::default()
        });

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE app_equip_lookups_total counter\n"));
        assert!(text.contains("app_equip_lookups_total 4\n"));
        assert!(text.contains("app_equip_exact_hits_total 3\n"));
        assert!(text.contains("# TYPE app_inventories gauge\n"));
        assert!(text.contains("app_inventories 2\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&EquipMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\nequip_misses_total 0\n"));
    }
}
