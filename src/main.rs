//! MagnetSearch-RS: concurrent magnet link search over multiple torrent sites
//!
//! This is the main entry point for the application.

use anyhow::{Context, Result};
use magnetsearch_rs::{
    config::{self, Settings},
    network::HttpClient,
    providers::ProviderLoader,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().skip(1).any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    // Load configuration before logging so general.debug can pick the level
    let settings = config::load()?;
    init_logging(&settings);

    info!("Starting MagnetSearch-RS v{}", magnetsearch_rs::VERSION);
    info!(
        "Loaded configuration for instance: {}",
        settings.general.instance_name
    );
    let settings = config::init(settings)?;

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Load providers
    let registry = ProviderLoader::load(settings, &client);
    info!("Loaded {} providers: {:?}", registry.len(), registry.names());

    let state = AppState::new(settings.clone(), registry);
    let app = create_router(state);

    let addr = SocketAddr::new(
        settings
            .server
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", settings.server.bind_address))?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(settings: &Settings) {
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
MagnetSearch-RS v{}
Concurrent magnet link search over multiple torrent sites

USAGE:
    magnetsearch-rs [OPTIONS]

OPTIONS:
    -h, --help             Print help information

ENVIRONMENT VARIABLES:
    MAGNETSEARCH_SETTINGS_PATH  Path to settings.yml
    MAGNETSEARCH_DEBUG          Enable debug logging (true/false)
    MAGNETSEARCH_PORT           Server port
    MAGNETSEARCH_BIND_ADDRESS   Bind address
    MAGNETSEARCH_TIMEOUT        Provider timeout in seconds
    MAGNETSEARCH_SLOW_TIMEOUT   Slow provider timeout in seconds
    RUST_LOG                    Log filter, overrides the configured level
"#,
        magnetsearch_rs::VERSION
    );
}
