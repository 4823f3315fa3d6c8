use trawler_core::{Aggregator, Config};

/// Shared application state
pub struct AppState {
    config: Config,
    aggregator: Aggregator,
}

impl AppState {
    pub fn new(config: Config, aggregator: Aggregator) -> Self {
        Self { config, aggregator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}
