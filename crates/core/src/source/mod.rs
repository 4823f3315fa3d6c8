//! Torrent listing sources.
//!
//! Each source speaks one upstream's wire format (JSON API or scraped HTML)
//! and maps it into `TorrentRecord`s. Sources share nothing but the injected
//! `FetchClient`, and `Source::search` never fails outward.

mod bitsearch;
mod size;
mod solid;
mod types;
mod yts;

pub use bitsearch::BitSearch;
pub use size::{format_bytes, format_size};
pub use solid::SolidTorrents;
pub use types::*;
pub use yts::Yts;

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, SourceKind};
use crate::fetch::FetchClient;

/// Build the configured sources, in priority order.
pub fn build_sources(config: &Config, fetcher: Arc<dyn FetchClient>) -> Vec<Arc<dyn Source>> {
    let timeout = config.aggregator.source_timeout();

    config
        .aggregator
        .sources
        .iter()
        .map(|kind| {
            info!(source = ?kind, "Enabling source");
            let fetcher = Arc::clone(&fetcher);
            let source: Arc<dyn Source> = match kind {
                SourceKind::Solid => Arc::new(SolidTorrents::new(
                    &config.sources.solid,
                    fetcher,
                    timeout,
                )),
                SourceKind::Bitsearch => Arc::new(BitSearch::new(
                    &config.sources.bitsearch,
                    fetcher,
                    timeout,
                )),
                SourceKind::Yts => Arc::new(Yts::new(&config.sources.yts, fetcher, timeout)),
            };
            source
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetchClient;

    #[test]
    fn test_build_sources_follows_configured_order() {
        let mut config = Config::default();
        config.aggregator.sources = vec![SourceKind::Yts, SourceKind::Solid];

        let sources = build_sources(&config, Arc::new(MockFetchClient::new()));
        let names: Vec<_> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["yts", "solid"]);
    }

    #[test]
    fn test_build_sources_default_order() {
        let sources = build_sources(&Config::default(), Arc::new(MockFetchClient::new()));
        let names: Vec<_> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["solid", "bitsearch", "yts"]);
    }
}
