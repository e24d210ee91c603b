//! Prometheus metrics for the packaging pipeline.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Packaging operations by media kind and outcome.
pub static PACKAGING_OPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("packrat_packaging_ops_total", "Total packaging operations"),
        &["kind", "result"], // result: "ok", "conflict", "error"
    )
    .unwrap()
});

/// Duration of .torrent writes, dominated by piece hashing.
pub static TORRENT_WRITE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "packrat_torrent_write_duration_seconds",
            "Time to hash and write a .torrent file",
        )
        .buckets(vec![0.1, 0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0]),
        &["kind"],
    )
    .unwrap()
});

/// Conflicts reported by the pre-flight detector.
pub static CONFLICTS_DETECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("packrat_conflicts_detected_total", "Pre-flight conflicts found"),
        &["kind"],
    )
    .unwrap()
});

/// Probes that degraded to empty metadata.
pub static PROBE_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("packrat_probe_failures_total", "ffprobe runs that failed").unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PACKAGING_OPS.clone()),
        Box::new(TORRENT_WRITE_DURATION.clone()),
        Box::new(CONFLICTS_DETECTED.clone()),
        Box::new(PROBE_FAILURES.clone()),
    ]
}
