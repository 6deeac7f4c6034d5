//! Prometheus metrics for the merge pipeline.
//!
//! This module provides metrics for:
//! - Batch runs (outcomes, pair counts)
//! - Pair merges (counts, duration)
//! - Archiving (counts, duration, per backend)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Batch runs total by result.
pub static BATCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("fusor_batches_total", "Total batch merge requests"),
        &["result"], // "success", "validation_failed", "failed"
    )
    .unwrap()
});

/// Pairs merged successfully.
pub static PAIRS_MERGED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "fusor_pairs_merged_total",
        "Total (order, invoice) pairs merged",
    )
    .unwrap()
});

/// Pairs per batch.
pub static BATCH_PAIRS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("fusor_batch_pairs", "Number of pairs per batch run")
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
    )
    .unwrap()
});

/// Single pair merge duration in seconds.
pub static MERGE_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "fusor_merge_duration_seconds",
            "Duration of one pair merge",
        )
        .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
    )
    .unwrap()
});

/// Archives written total by backend and result.
pub static ARCHIVES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("fusor_archives_total", "Total archives written"),
        &["backend", "result"], // result: "success", "failed"
    )
    .unwrap()
});

/// Archive write duration in seconds by backend.
pub static ARCHIVE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "fusor_archive_duration_seconds",
            "Duration of archive packaging",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["backend"],
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(BATCHES_TOTAL.clone()),
        Box::new(PAIRS_MERGED_TOTAL.clone()),
        Box::new(BATCH_PAIRS.clone()),
        Box::new(MERGE_DURATION.clone()),
        Box::new(ARCHIVES_TOTAL.clone()),
        Box::new(ARCHIVE_DURATION.clone()),
    ]
}
