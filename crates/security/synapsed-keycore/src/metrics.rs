//! Operation metrics: per-call counters and duration histograms emitted
//! through the `metrics` facade, plus a small in-process rollup used for
//! the Core's own health summary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use metrics::{counter, histogram};

use crate::model::UsageOperation;

/// Aggregated counts the Core's health endpoint reports alongside the
/// backend probes from [`crate::protector::Protector::health`].
#[derive(Debug, Default)]
pub struct HealthSummary {
    pub total_operations: u64,
    pub total_failures: u64,
    pub error_rate_percent: f64,
}

/// Lightweight operation-metrics recorder.
///
/// Every call also pushes through the `metrics` crate so a Prometheus (or
/// other) exporter installed by the embedding application picks it up;
/// the atomics here exist purely for `health()`'s own in-process summary,
/// which must work even with no exporter installed.
#[derive(Default)]
pub struct OperationMetrics {
    total: AtomicU64,
    failures: AtomicU64,
    slow_threshold: Duration,
}

impl OperationMetrics {
    pub fn new(slow_threshold: Duration) -> Self {
        Self { total: AtomicU64::new(0), failures: AtomicU64::new(0), slow_threshold }
    }

    /// Record a completed operation's outcome and duration.
    pub fn record(&self, operation: UsageOperation, success: bool, duration: Duration) {
        self.total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }

        let op_label = operation.to_string();
        counter!("keycore_operations_total", "operation" => op_label.clone(), "outcome" => if success { "success" } else { "failure" }).increment(1);
        histogram!("keycore_operation_duration_seconds", "operation" => op_label.clone()).record(duration.as_secs_f64());

        if duration >= self.slow_threshold {
            tracing::warn!(
                operation = %op_label,
                duration_ms = duration.as_millis() as u64,
                "slow key-core operation"
            );
        }
    }

    /// Snapshot the in-process rollup.
    pub fn summary(&self) -> HealthSummary {
        let total = self.total.load(Ordering::Relaxed);
        let failures = self.failures.load(Ordering::Relaxed);
        let error_rate_percent = if total == 0 { 0.0 } else { (failures as f64 / total as f64) * 100.0 };
        HealthSummary { total_operations: total, total_failures: failures, error_rate_percent }
    }
}
