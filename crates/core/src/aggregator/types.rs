//! Types produced by the aggregator.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::TorrentRecord;

/// How a single source's search settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// Finished in time. Failures inside the source also land here with zero
    /// results.
    Completed { results: usize },
    /// Hit the per-source timeout or the overall budget.
    TimedOut,
    /// The source task panicked.
    Crashed,
}

impl SourceOutcome {
    /// Label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            SourceOutcome::Completed { .. } => "completed",
            SourceOutcome::TimedOut => "timed_out",
            SourceOutcome::Crashed => "crashed",
        }
    }
}

/// Per-source diagnostics for one aggregate query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: String,
    #[serde(flatten)]
    pub outcome: SourceOutcome,
    pub duration_ms: u64,
}

/// Merged result of one keyword query.
#[derive(Debug, Clone)]
pub struct AggregateResult {
    /// The trimmed keyword that was searched.
    pub keyword: String,
    /// Deduplicated records, in source priority order.
    pub records: Vec<TorrentRecord>,
    /// Wall-clock time from dispatch until every source settled.
    pub elapsed: Duration,
    /// One report per source, in priority order.
    pub sources: Vec<SourceReport>,
}

impl AggregateResult {
    pub fn duration_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Errors that prevent a query from being attempted at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Search keyword must not be empty")]
    EmptyKeyword,
}
