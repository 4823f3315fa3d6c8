//! SolidTorrents JSON API source.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use crate::config::SolidConfig;
use crate::fetch::{FetchClient, FetchRequest};

use super::size::{format_bytes, format_size};
use super::{Source, SourceError, Stat, TorrentRecord, UNKNOWN_DATE};

const ENGINE: &str = "Solid";

/// SolidTorrents search API (`/api/v1/search`).
pub struct SolidTorrents {
    fetcher: Arc<dyn FetchClient>,
    base_url: String,
    timeout: Duration,
}

impl SolidTorrents {
    pub fn new(config: &SolidConfig, fetcher: Arc<dyn FetchClient>, timeout: Duration) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn build_request(&self, keyword: &str) -> FetchRequest {
        FetchRequest::get(format!("{}/api/v1/search", self.base_url))
            .param("q", keyword)
            .param("category", "all")
            .param("sort", "seeders")
            .timeout(self.timeout)
    }
}

#[async_trait]
impl Source for SolidTorrents {
    fn name(&self) -> &str {
        "solid"
    }

    async fn fetch_records(&self, keyword: &str) -> Result<Vec<TorrentRecord>, SourceError> {
        let response = self.fetcher.fetch(self.build_request(keyword)).await?;
        if !response.is_success() {
            return Err(SourceError::Status(response.status));
        }

        let records = parse_response(&response.body)?;
        debug!(source = ENGINE, results = records.len(), "Parsed SolidTorrents response");
        Ok(records)
    }
}

/// Map a SolidTorrents response body into records.
pub(crate) fn parse_response(body: &str) -> Result<Vec<TorrentRecord>, SourceError> {
    let response: SolidResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    Ok(response.hits.into_iter().map(SolidHit::into_record).collect())
}

// SolidTorrents API response types
#[derive(Debug, Deserialize)]
struct SolidResponse {
    #[serde(default)]
    hits: Vec<SolidHit>,
}

#[derive(Debug, Deserialize)]
struct SolidHit {
    title: String,
    size: SolidSize,
    #[serde(default)]
    imported: Option<String>,
    magnet: String,
    swarm: SolidSwarm,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SolidSize {
    Bytes(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct SolidSwarm {
    seeders: u64,
    leechers: u64,
}

/// "2024-04-25T10:12:00.000Z" -> "2024-04-25". Strings that are not RFC 3339
/// keep whatever precedes the first `T`.
fn import_date(imported: &str) -> String {
    match DateTime::parse_from_rfc3339(imported) {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string(),
        Err(_) => imported.split('T').next().unwrap_or_default().to_string(),
    }
}

impl SolidHit {
    fn into_record(self) -> TorrentRecord {
        let size = match self.size {
            SolidSize::Bytes(bytes) => format_bytes(bytes),
            SolidSize::Text(text) => format_size(&text),
        };
        let date = self
            .imported
            .as_deref()
            .map(import_date)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        TorrentRecord {
            engine: ENGINE.to_string(),
            name: self.title,
            size,
            date,
            magnet: self.magnet,
            seeders: Stat::Count(self.swarm.seeders),
            leechers: Stat::Count(self.swarm.leechers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchResponse;
    use crate::testing::MockFetchClient;

    const SAMPLE: &str = r#"{
        "hits": [
            {
                "title": "Ubuntu 24.04 Desktop amd64",
                "size": 6114656256,
                "imported": "2024-04-25T10:12:00.000Z",
                "magnet": "magnet:?xt=urn:btih:aaaa",
                "swarm": { "seeders": 812, "leechers": 31 }
            },
            {
                "title": "Ubuntu 24.04 Server",
                "size": "2.6 GB",
                "magnet": "magnet:?xt=urn:btih:bbbb",
                "swarm": { "seeders": 40, "leechers": 2 }
            }
        ]
    }"#;

    fn source(fetcher: Arc<MockFetchClient>) -> SolidTorrents {
        SolidTorrents::new(&SolidConfig::default(), fetcher, Duration::from_secs(5))
    }

    #[test]
    fn test_parse_response() {
        let records = parse_response(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].engine, "Solid");
        assert_eq!(records[0].name, "Ubuntu 24.04 Desktop amd64");
        assert_eq!(records[0].size, "5.7 GB");
        assert_eq!(records[0].date, "2024-04-25");
        assert_eq!(records[0].magnet, "magnet:?xt=urn:btih:aaaa");
        assert_eq!(records[0].seeders, Stat::Count(812));
        assert_eq!(records[0].leechers, Stat::Count(31));

        assert_eq!(records[1].size, "2.6 GB");
        assert_eq!(records[1].date, UNKNOWN_DATE);
    }

    #[test]
    fn test_parse_response_without_hits() {
        assert!(parse_response("{}").unwrap().is_empty());
        assert!(parse_response(r#"{"hits": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_response_malformed() {
        assert!(matches!(
            parse_response("<html>Just a moment...</html>"),
            Err(SourceError::Parse(_))
        ));
        // A hit with a missing field invalidates the body
        assert!(matches!(
            parse_response(r#"{"hits": [{"title": "x"}]}"#),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn test_build_request() {
        let fetcher = Arc::new(MockFetchClient::new());
        let request = source(fetcher).build_request("debian 12");

        assert_eq!(request.url, "https://solidtorrents.to/api/v1/search");
        assert_eq!(request.param_value("q"), Some("debian 12"));
        assert_eq!(request.param_value("category"), Some("all"));
        assert_eq!(request.param_value("sort"), Some("seeders"));
        assert_eq!(request.timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_fetch_records() {
        let fetcher = Arc::new(MockFetchClient::new());
        fetcher
            .respond("solidtorrents.to", FetchResponse::new(200, SAMPLE))
            .await;

        let records = source(fetcher.clone()).fetch_records("ubuntu").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(fetcher.recorded_requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_records_error_status() {
        let fetcher = Arc::new(MockFetchClient::new());
        fetcher
            .respond("solidtorrents.to", FetchResponse::new(503, "down"))
            .await;

        let result = source(fetcher.clone()).fetch_records("ubuntu").await;
        assert!(matches!(result, Err(SourceError::Status(503))));
        assert!(source(fetcher).search("ubuntu").await.is_empty());
    }

    #[test]
    fn test_import_date() {
        assert_eq!(import_date("2024-04-25T10:12:00.000Z"), "2024-04-25");
        assert_eq!(import_date("2024-04-25T23:30:00+05:00"), "2024-04-25");
        assert_eq!(import_date("2019-01-02"), "2019-01-02");
        assert_eq!(import_date("T10:00"), "");
    }
}
