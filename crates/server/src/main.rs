use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trawler_core::{
    build_sources, load_config_or_default, validate_config, Aggregator, Config, FetchClient,
    HttpFetchClient,
};
use trawler_server::{api::create_router, state::AppState};

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "TRAWLER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<()> {
    let config_path = std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    info!(path = ?config_path, "Loading configuration");
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!(
        source_timeout_secs = config.aggregator.source_timeout_secs,
        overall_budget_secs = config.aggregator.overall_budget_secs,
        dedup = ?config.aggregator.dedup,
        "Configuration loaded"
    );

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(build_state(config)?);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Wire the HTTP client, sources and aggregator from config.
fn build_state(config: Config) -> Result<AppState> {
    let fetcher: Arc<dyn FetchClient> = Arc::new(
        HttpFetchClient::new(&config.fetch).context("Failed to create HTTP client")?,
    );

    let aggregator = Aggregator::from_config(&config.aggregator, build_sources(&config, fetcher));
    info!(sources = %aggregator.source_names().join(", "), "Sources ready");

    Ok(AppState::new(config, aggregator))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
