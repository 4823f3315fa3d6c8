//! BitSearch scraped HTML source.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::config::BitSearchConfig;
use crate::fetch::{FetchClient, FetchRequest};

use super::{Source, SourceError, Stat, TorrentRecord};

const ENGINE: &str = "Bit";

/// Minimum number of `.stats div` cells a result row needs.
const MIN_STATS: usize = 5;

/// BitSearch HTML search page (`/search?q=`).
pub struct BitSearch {
    fetcher: Arc<dyn FetchClient>,
    base_url: String,
    timeout: Duration,
}

impl BitSearch {
    pub fn new(config: &BitSearchConfig, fetcher: Arc<dyn FetchClient>, timeout: Duration) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn build_request(&self, keyword: &str) -> FetchRequest {
        FetchRequest::get(format!(
            "{}/search?q={}",
            self.base_url,
            urlencoding::encode(keyword)
        ))
        .timeout(self.timeout)
    }
}

#[async_trait]
impl Source for BitSearch {
    fn name(&self) -> &str {
        "bitsearch"
    }

    async fn fetch_records(&self, keyword: &str) -> Result<Vec<TorrentRecord>, SourceError> {
        let response = self.fetcher.fetch(self.build_request(keyword)).await?;
        if response.status != 200 {
            return Err(SourceError::Status(response.status));
        }

        let records = parse_page(&response.body)?;
        debug!(source = ENGINE, results = records.len(), "Parsed BitSearch page");
        Ok(records)
    }
}

struct PageSelectors {
    item: Selector,
    title: Selector,
    magnet: Selector,
    stats: Selector,
}

impl PageSelectors {
    fn new() -> Result<Self, SourceError> {
        Ok(Self {
            item: selector("li.search-result")?,
            title: selector(".info h5 a")?,
            magnet: selector(".links a.dl-magnet")?,
            stats: selector(".stats div")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("bad selector {}: {}", css, e)))
}

/// Extract every well-formed result row from a search page.
///
/// Rows missing any expected element are skipped; they never abort the page.
pub(crate) fn parse_page(html: &str) -> Result<Vec<TorrentRecord>, SourceError> {
    let selectors = PageSelectors::new()?;
    let document = Html::parse_document(html);

    let records = document
        .select(&selectors.item)
        .enumerate()
        .filter_map(|(index, item)| {
            let record = parse_item(item, &selectors);
            if record.is_none() {
                trace!(source = ENGINE, index, "Skipping malformed result row");
            }
            record
        })
        .collect();

    Ok(records)
}

fn parse_item(item: ElementRef<'_>, selectors: &PageSelectors) -> Option<TorrentRecord> {
    let name = stripped_text(item.select(&selectors.title).next()?);
    let magnet = item
        .select(&selectors.magnet)
        .next()?
        .value()
        .attr("href")?
        .to_string();

    let stats: Vec<String> = item.select(&selectors.stats).map(stripped_text).collect();
    if stats.len() < MIN_STATS {
        return None;
    }

    Some(TorrentRecord {
        engine: ENGINE.to_string(),
        name,
        size: stats[1].clone(),
        date: stats[4].clone(),
        magnet,
        seeders: Stat::Text(stats[2].clone()),
        leechers: Stat::Text(stats[3].clone()),
    })
}

/// Concatenated text of an element with each text node trimmed.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}
