//! YTS movie API source.
//!
//! Each movie lists several torrents (one per quality), so a single movie
//! yields one record per torrent, each with its own magnet.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::YtsConfig;
use crate::fetch::{FetchClient, FetchRequest};

use super::size::format_size;
use super::{Source, SourceError, Stat, TorrentRecord, UNKNOWN_DATE};

const ENGINE: &str = "YTS";

/// YTS `list_movies.json` endpoint.
pub struct Yts {
    fetcher: Arc<dyn FetchClient>,
    base_url: String,
    limit: u32,
    timeout: Duration,
}

impl Yts {
    pub fn new(config: &YtsConfig, fetcher: Arc<dyn FetchClient>, timeout: Duration) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
            timeout,
        }
    }

    fn build_request(&self, keyword: &str) -> FetchRequest {
        FetchRequest::get(format!("{}/api/v2/list_movies.json", self.base_url))
            .param("query_term", keyword)
            .param("limit", self.limit.to_string())
            .timeout(self.timeout)
    }
}

#[async_trait]
impl Source for Yts {
    fn name(&self) -> &str {
        "yts"
    }

    async fn fetch_records(&self, keyword: &str) -> Result<Vec<TorrentRecord>, SourceError> {
        let response = self.fetcher.fetch(self.build_request(keyword)).await?;
        if !response.is_success() {
            return Err(SourceError::Status(response.status));
        }

        let records = parse_response(&response.body)?;
        debug!(source = ENGINE, results = records.len(), "Parsed YTS response");
        Ok(records)
    }
}

/// Map a YTS response body into records.
///
/// A non-"ok" status or a zero movie count means nothing was found.
pub(crate) fn parse_response(body: &str) -> Result<Vec<TorrentRecord>, SourceError> {
    let response: YtsResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    let data = match response.data {
        Some(data) if response.status == "ok" && data.movie_count > 0 => data,
        _ => return Ok(Vec::new()),
    };

    let records = data
        .movies
        .into_iter()
        .flat_map(|movie| {
            let date = movie
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| UNKNOWN_DATE.to_string());
            let title = movie.title;
            movie.torrents.into_iter().map(move |t| TorrentRecord {
                engine: ENGINE.to_string(),
                name: format!("{} ({})", title, t.quality),
                size: format_size(&t.size),
                date: date.clone(),
                magnet: magnet_uri(&t.hash, &title),
                seeders: Stat::Count(t.seeds),
                leechers: Stat::Count(t.peers),
            })
        })
        .collect();

    Ok(records)
}

fn magnet_uri(hash: &str, title: &str) -> String {
    format!(
        "magnet:?xt=urn:btih:{}&dn={}",
        hash,
        urlencoding::encode(title)
    )
}

// YTS API response types
#[derive(Debug, Deserialize)]
struct YtsResponse {
    status: String,
    #[serde(default)]
    data: Option<YtsData>,
}

#[derive(Debug, Deserialize)]
struct YtsData {
    #[serde(default)]
    movie_count: u64,
    #[serde(default)]
    movies: Vec<YtsMovie>,
}

#[derive(Debug, Deserialize)]
struct YtsMovie {
    title: String,
    #[serde(default)]
    year: Option<u32>,
    #[serde(default)]
    torrents: Vec<YtsTorrent>,
}

#[derive(Debug, Deserialize)]
struct YtsTorrent {
    hash: String,
    quality: String,
    size: String,
    seeds: u64,
    peers: u64,
}
