//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Per-source searches (outcome counts, durations)
//! - Merged result sizes
//!
//! The server registers these (via `all_metrics`) alongside HTTP metrics.

use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

use crate::aggregator::SourceOutcome;

// =============================================================================
// Source Metrics
// =============================================================================

/// Source searches total by source and outcome.
pub static SOURCE_SEARCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("trawler_source_searches_total", "Total searches per source"),
        &["source", "outcome"], // "completed", "timed_out", "crashed"
    )
    .unwrap()
});

/// Source search duration in seconds.
pub static SOURCE_SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "trawler_source_search_duration_seconds",
            "Time until a source search settled",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0, 30.0]),
        &["source"],
    )
    .unwrap()
});

/// Records returned per source search.
pub static SOURCE_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "trawler_source_results",
            "Number of records returned per source search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        &["source"],
    )
    .unwrap()
});

// =============================================================================
// Aggregate Metrics
// =============================================================================

/// Records per merged result.
pub static MERGED_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "trawler_merged_results",
            "Number of records after merge and deduplication",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
    )
    .unwrap()
});

/// Record how one source search settled.
pub fn record_source_search(source: &str, outcome: &SourceOutcome, elapsed: Duration) {
    SOURCE_SEARCHES
        .with_label_values(&[source, outcome.label()])
        .inc();
    SOURCE_SEARCH_DURATION
        .with_label_values(&[source])
        .observe(elapsed.as_secs_f64());
    if let SourceOutcome::Completed { results } = outcome {
        SOURCE_RESULTS
            .with_label_values(&[source])
            .observe(*results as f64);
    }
}

/// All core metrics, for registration in the server's registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SOURCE_SEARCHES.clone()),
        Box::new(SOURCE_SEARCH_DURATION.clone()),
        Box::new(SOURCE_RESULTS.clone()),
        Box::new(MERGED_RESULTS.clone()),
    ]
}
