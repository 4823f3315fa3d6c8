//! Concurrent fan-out of one keyword to every source.
//!
//! Every source runs as its own task under a per-source timeout, and the
//! whole query is capped by an overall budget. Results are collected into
//! slots indexed by source priority, never by arrival order, then merged and
//! deduplicated.

mod dedup;
mod types;

pub use dedup::{dedup_key, extract_info_hash, merge_results};
pub use types::*;

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::{AggregatorConfig, DedupStrategy};
use crate::metrics;
use crate::source::{Source, TorrentRecord};

/// Runs keyword queries against a fixed, ordered set of sources.
pub struct Aggregator {
    sources: Vec<Arc<dyn Source>>,
    source_timeout: Duration,
    overall_budget: Duration,
    dedup: DedupStrategy,
}

impl Aggregator {
    /// Create an aggregator with default timeouts. `sources` order is the
    /// merge order and duplicate precedence.
    pub fn new(sources: Vec<Arc<dyn Source>>) -> Self {
        Self::from_config(&AggregatorConfig::default(), sources)
    }

    pub fn from_config(config: &AggregatorConfig, sources: Vec<Arc<dyn Source>>) -> Self {
        Self {
            sources,
            source_timeout: config.source_timeout(),
            overall_budget: config.overall_budget(),
            dedup: config.dedup,
        }
    }

    pub fn with_timeouts(mut self, source_timeout: Duration, overall_budget: Duration) -> Self {
        self.source_timeout = source_timeout;
        self.overall_budget = overall_budget;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupStrategy) -> Self {
        self.dedup = dedup;
        self
    }

    /// Source names in priority order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub async fn aggregate(&self, keyword: &str) -> Result<AggregateResult, AggregateError> {
        aggregate(
            keyword,
            &self.sources,
            self.source_timeout,
            self.overall_budget,
            self.dedup,
        )
        .await
    }
}

/// Search every source concurrently and merge the results.
///
/// Fails only for an empty keyword, before any source runs. A source that
/// errors, panics, or runs out of time contributes nothing and does not affect
/// the others. Waits for all sources to settle, but never past
/// `overall_budget`.
pub async fn aggregate(
    keyword: &str,
    sources: &[Arc<dyn Source>],
    source_timeout: Duration,
    overall_budget: Duration,
    dedup: DedupStrategy,
) -> Result<AggregateResult, AggregateError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(AggregateError::EmptyKeyword);
    }

    let start = Instant::now();
    let deadline = tokio::time::Instant::now() + overall_budget;

    debug!(
        keyword = %keyword,
        sources = sources.len(),
        source_timeout_ms = source_timeout.as_millis() as u64,
        overall_budget_ms = overall_budget.as_millis() as u64,
        "Starting aggregate search"
    );

    let searches = sources.iter().map(|source| {
        let name = source.name().to_string();
        let task_source = Arc::clone(source);
        let task_keyword = keyword.to_string();

        let mut handle = tokio::spawn(async move {
            tokio::time::timeout(source_timeout, task_source.search(&task_keyword)).await
        });

        async move {
            let (records, outcome) = match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(Ok(records))) => {
                    let outcome = SourceOutcome::Completed {
                        results: records.len(),
                    };
                    (records, outcome)
                }
                Ok(Ok(Err(_))) => {
                    warn!(source = %name, "Source timed out");
                    (Vec::new(), SourceOutcome::TimedOut)
                }
                Ok(Err(e)) => {
                    warn!(source = %name, error = %e, "Source task crashed");
                    (Vec::new(), SourceOutcome::Crashed)
                }
                Err(_) => {
                    // The upstream call may still be in flight; its result is discarded.
                    handle.abort();
                    warn!(source = %name, "Source exceeded overall budget");
                    (Vec::new(), SourceOutcome::TimedOut)
                }
            };

            let elapsed = start.elapsed();
            metrics::record_source_search(&name, &outcome, elapsed);
            debug!(
                source = %name,
                outcome = outcome.label(),
                results = records.len(),
                duration_ms = elapsed.as_millis() as u64,
                "Source settled"
            );

            let report = SourceReport {
                source: name,
                outcome,
                duration_ms: elapsed.as_millis() as u64,
            };
            (records, report)
        }
    });

    // join_all yields in input order, which is priority order
    let settled: Vec<(Vec<TorrentRecord>, SourceReport)> = join_all(searches).await;
    let elapsed = start.elapsed();

    let (per_source, reports): (Vec<_>, Vec<_>) = settled.into_iter().unzip();
    let records = merge_results(per_source, dedup);
    metrics::MERGED_RESULTS.observe(records.len() as f64);

    debug!(
        keyword = %keyword,
        results = records.len(),
        duration_ms = elapsed.as_millis() as u64,
        "Aggregate search complete"
    );

    Ok(AggregateResult {
        keyword: keyword.to_string(),
        records,
        elapsed,
        sources: reports,
    })
}
