pub mod aggregator;
pub mod config;
pub mod fetch;
pub mod metrics;
pub mod source;
pub mod testing;

pub use aggregator::{
    aggregate, merge_results, AggregateError, AggregateResult, Aggregator, SourceOutcome,
    SourceReport,
};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config,
    AggregatorConfig, Config, ConfigError, DedupStrategy, FetchConfig, ServerConfig, SourceKind,
};
pub use fetch::{FetchClient, FetchError, FetchRequest, FetchResponse, HttpFetchClient};
pub use source::{
    build_sources, format_bytes, format_size, BitSearch, SolidTorrents, Source, SourceError,
    Stat, TorrentRecord, Yts,
};
