//! Types shared by all torrent listing sources.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::fetch::FetchError;

/// Placeholder for sources that cannot supply a date.
pub const UNKNOWN_DATE: &str = "Unknown";

/// A seeder/leecher count as reported by a source.
///
/// JSON APIs hand out integers while scraped pages hand out text, so both are
/// kept as-is for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stat {
    Count(u64),
    Text(String),
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Count(n) => write!(f, "{}", n),
            Stat::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Stat {
    fn from(n: u64) -> Self {
        Stat::Count(n)
    }
}

impl From<String> for Stat {
    fn from(s: String) -> Self {
        Stat::Text(s)
    }
}

impl From<&str> for Stat {
    fn from(s: &str) -> Self {
        Stat::Text(s.to_string())
    }
}

/// A normalized torrent listing.
///
/// Field names and order are part of the serialized contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentRecord {
    /// Display name of the source that produced this record.
    pub engine: String,
    /// Human-readable title.
    pub name: String,
    /// Human-readable size.
    pub size: String,
    /// Free-form date, `"Unknown"` when not supplied.
    pub date: String,
    /// Magnet URI; the deduplication key.
    pub magnet: String,
    pub seeders: Stat,
    pub leechers: Stat,
}

impl TorrentRecord {
    /// Key used for deduplication.
    pub fn identity_key(&self) -> &str {
        &self.magnet
    }

    /// A record without an identity key cannot be linked or deduplicated.
    pub fn has_identity(&self) -> bool {
        !self.magnet.trim().is_empty()
    }
}

/// Errors a source hits while fetching or parsing.
///
/// These never leave the source: `Source::search` logs them and yields an
/// empty result instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// A torrent listing source.
#[async_trait]
pub trait Source: Send + Sync {
    /// Source name for logging and reports.
    fn name(&self) -> &str;

    /// Query the upstream and map its response into records.
    ///
    /// An upstream "nothing found" answer is `Ok(vec![])`, not an error.
    async fn fetch_records(&self, keyword: &str) -> Result<Vec<TorrentRecord>, SourceError>;

    /// Search this source, absorbing every failure into an empty result.
    async fn search(&self, keyword: &str) -> Vec<TorrentRecord> {
        match self.fetch_records(keyword).await {
            Ok(records) => records,
            Err(e) => {
                warn!(source = self.name(), error = %e, "Source search failed");
                Vec::new()
            }
        }
    }
}
