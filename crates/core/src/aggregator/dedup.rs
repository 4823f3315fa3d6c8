//! Priority-ordered merge and deduplication of per-source results.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::config::DedupStrategy;
use crate::source::TorrentRecord;

static BTIH: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)xt=urn:btih:([0-9a-z]+)").ok());

/// Merge per-source results into one list without duplicates.
///
/// `per_source` must already be in priority order. Records are concatenated
/// stably, records without an identity key are dropped, and for every key only
/// the first record encountered is kept, so higher-priority sources win.
/// Records themselves are never modified.
pub fn merge_results(
    per_source: Vec<Vec<TorrentRecord>>,
    strategy: DedupStrategy,
) -> Vec<TorrentRecord> {
    let mut seen: HashSet<String> = HashSet::new();

    per_source
        .into_iter()
        .flatten()
        .filter(|record| match dedup_key(record, strategy) {
            Some(key) => seen.insert(key),
            None => false,
        })
        .collect()
}

/// Key under which a record is deduplicated, `None` if it has no identity.
pub fn dedup_key(record: &TorrentRecord, strategy: DedupStrategy) -> Option<String> {
    if !record.has_identity() {
        return None;
    }

    let magnet = record.identity_key();
    match strategy {
        DedupStrategy::Exact => Some(magnet.to_string()),
        DedupStrategy::InfoHash => Some(
            extract_info_hash(magnet).unwrap_or_else(|| magnet.trim().to_string()),
        ),
    }
}

/// Lowercase BitTorrent info-hash from a magnet URI.
pub fn extract_info_hash(magnet: &str) -> Option<String> {
    BTIH.as_ref()?
        .captures(magnet)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}
