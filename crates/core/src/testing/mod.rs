//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the source and fetch client
//! traits, allowing aggregator and server tests without real upstreams.
//!
//! # Example
//!
//! ```rust,ignore
//! use trawler_core::testing::{fixtures, MockFetchClient, MockSource};
//!
//! let source = MockSource::with_records("solid", vec![
//!     fixtures::record("Solid", "Ubuntu 24.04", "magnet:?xt=urn:btih:abc"),
//! ]);
//! source.set_delay(Duration::from_millis(200)).await;
//!
//! let fetcher = MockFetchClient::new();
//! fetcher.respond("yts.mx", FetchResponse::new(200, body)).await;
//! ```

mod mock_fetch_client;
mod mock_source;

pub use mock_fetch_client::MockFetchClient;
pub use mock_source::MockSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::source::{Stat, TorrentRecord};

    /// Create a test record with reasonable defaults.
    pub fn record(engine: &str, name: &str, magnet: &str) -> TorrentRecord {
        TorrentRecord {
            engine: engine.to_string(),
            name: name.to_string(),
            size: "700.0 MB".to_string(),
            date: "2024-01-01".to_string(),
            magnet: magnet.to_string(),
            seeders: Stat::Count(50),
            leechers: Stat::Count(10),
        }
    }

    /// Create a test record with a magnet built from an info-hash.
    pub fn record_with_hash(engine: &str, name: &str, info_hash: &str) -> TorrentRecord {
        record(engine, name, &magnet(info_hash))
    }

    /// Build a bare magnet URI for an info-hash.
    pub fn magnet(info_hash: &str) -> String {
        format!("magnet:?xt=urn:btih:{}", info_hash)
    }
}
