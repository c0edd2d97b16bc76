//! Overlay observability counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for overlay activity, shared by every request served by one
/// [`OverlayApplier`](crate::translation::OverlayApplier).
#[derive(Debug, Default)]
pub struct OverlayMetrics {
    /// Bulk lookups issued against the store (one per object)
    lookups: AtomicUsize,

    /// Bulk lookups that failed and were treated as "no overlay"
    lookup_failures: AtomicUsize,

    /// Objects skipped because they carry no identifier
    missing_ids: AtomicUsize,

    /// Attributes replaced with a translated value
    fields_overlaid: AtomicUsize,

    /// Attributes left in the default language for lack of a translation
    fields_fallback: AtomicUsize,
}

impl OverlayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lookup_failure(&self) {
        self.lookup_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_id(&self) {
        self.missing_ids.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fields(&self, overlaid: usize, fallback: usize) {
        self.fields_overlaid.fetch_add(overlaid, Ordering::Relaxed);
        self.fields_fallback.fetch_add(fallback, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn lookup_failures(&self) -> usize {
        self.lookup_failures.load(Ordering::Relaxed)
    }

    pub fn missing_ids(&self) -> usize {
        self.missing_ids.load(Ordering::Relaxed)
    }

    pub fn fields_overlaid(&self) -> usize {
        self.fields_overlaid.load(Ordering::Relaxed)
    }

    pub fn fields_fallback(&self) -> usize {
        self.fields_fallback.load(Ordering::Relaxed)
    }

    /// Snapshot of the counters.
    pub fn report(&self) -> MetricsReport {
        let overlaid = self.fields_overlaid();
        let fallback = self.fields_fallback();
        let candidates = overlaid + fallback;
        let coverage_rate = if candidates > 0 {
            (overlaid as f64 / candidates as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups: self.lookups(),
            lookup_failures: self.lookup_failures(),
            missing_ids: self.missing_ids(),
            fields_overlaid: overlaid,
            fields_fallback: fallback,
            coverage_rate,
        }
    }
}

/// Serializable overlay metrics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub lookups: usize,
    pub lookup_failures: usize,
    pub missing_ids: usize,
    pub fields_overlaid: usize,
    pub fields_fallback: usize,
    /// Percentage of candidate attributes that had a translation
    pub coverage_rate: f64,
}
