use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Largest page size the YTS API accepts.
const YTS_MAX_LIMIT: u32 = 50;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - At least one source, none listed twice
/// - Timeouts are non-zero and the overall budget covers one source timeout
/// - Source base URLs are http(s)
/// - YTS limit is within the API range
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(invalid("server.port cannot be 0"));
    }

    // Aggregator validation
    let aggregator = &config.aggregator;
    if aggregator.sources.is_empty() {
        return Err(invalid("aggregator.sources must list at least one source"));
    }
    let mut seen = HashSet::new();
    for kind in &aggregator.sources {
        if !seen.insert(kind) {
            return Err(ConfigError::ValidationError(format!(
                "aggregator.sources lists {:?} more than once",
                kind
            )));
        }
    }
    if aggregator.source_timeout_secs == 0 {
        return Err(invalid("aggregator.source_timeout_secs cannot be 0"));
    }
    if aggregator.overall_budget_secs < aggregator.source_timeout_secs {
        return Err(invalid(
            "aggregator.overall_budget_secs must be at least aggregator.source_timeout_secs",
        ));
    }

    // Source validation
    let urls = [
        ("sources.solid.base_url", &config.sources.solid.base_url),
        ("sources.bitsearch.base_url", &config.sources.bitsearch.base_url),
        ("sources.yts.base_url", &config.sources.yts.base_url),
    ];
    for (field, url) in urls {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be an http(s) URL, got {:?}",
                field, url
            )));
        }
    }
    if !(1..=YTS_MAX_LIMIT).contains(&config.sources.yts.limit) {
        return Err(ConfigError::ValidationError(format!(
            "sources.yts.limit must be between 1 and {}",
            YTS_MAX_LIMIT
        )));
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}
