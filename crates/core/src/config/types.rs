use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    5000
}

/// Available torrent listing sources
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Solid,
    Bitsearch,
    Yts,
}

/// How merged records are considered duplicates
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DedupStrategy {
    /// Full magnet string equality.
    #[default]
    Exact,
    /// Same BitTorrent info-hash, whatever the trackers or display name.
    InfoHash,
}

/// Aggregation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregatorConfig {
    /// Enabled sources. Order sets merge order and duplicate precedence.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceKind>,
    /// Per-source timeout in seconds (default: 10)
    #[serde(default = "default_source_timeout")]
    pub source_timeout_secs: u64,
    /// Whole-query budget in seconds (default: 15)
    #[serde(default = "default_overall_budget")]
    pub overall_budget_secs: u64,
    #[serde(default)]
    pub dedup: DedupStrategy,
}

impl AggregatorConfig {
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    pub fn overall_budget(&self) -> Duration {
        Duration::from_secs(self.overall_budget_secs)
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            source_timeout_secs: default_source_timeout(),
            overall_budget_secs: default_overall_budget(),
            dedup: DedupStrategy::default(),
        }
    }
}

fn default_sources() -> Vec<SourceKind> {
    vec![SourceKind::Solid, SourceKind::Bitsearch, SourceKind::Yts]
}

fn default_source_timeout() -> u64 {
    10
}

fn default_overall_budget() -> u64 {
    15
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

/// Per-source upstream settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub solid: SolidConfig,
    #[serde(default)]
    pub bitsearch: BitSearchConfig,
    #[serde(default)]
    pub yts: YtsConfig,
}

/// SolidTorrents API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolidConfig {
    #[serde(default = "default_solid_url")]
    pub base_url: String,
}

impl Default for SolidConfig {
    fn default() -> Self {
        Self {
            base_url: default_solid_url(),
        }
    }
}

fn default_solid_url() -> String {
    "https://solidtorrents.to".to_string()
}

/// BitSearch site configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BitSearchConfig {
    #[serde(default = "default_bitsearch_url")]
    pub base_url: String,
}

impl Default for BitSearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_bitsearch_url(),
        }
    }
}

fn default_bitsearch_url() -> String {
    "https://bitsearch.to".to_string()
}

/// YTS API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YtsConfig {
    #[serde(default = "default_yts_url")]
    pub base_url: String,
    /// Maximum movies per query (default: 10, API maximum: 50)
    #[serde(default = "default_yts_limit")]
    pub limit: u32,
}

impl Default for YtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_yts_url(),
            limit: default_yts_limit(),
        }
    }
}

fn default_yts_url() -> String {
    "https://yts.mx".to_string()
}

fn default_yts_limit() -> u32 {
    10
}
