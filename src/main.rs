//! Multi-format URL redirect server.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!                      │                REDIRECT SERVER                  │
//!                      │                                                 │
//!   source files ──────┼─▶ config::loader ──▶ FormatCache ──▶ mappings  │
//!   (yaml/json/toml)   │         │                               │       │
//!                      │         ▼                               ▼       │
//!   Client Request ────┼─▶ http::server ──▶ routing::chain ──▶ 303/301  │
//!                      │                                                 │
//!                      │   mappings ──▶ persist::writer ──▶ audit files │
//!                      └────────────────────────────────────────────────┘
//! ```
//!
//! Startup loads every configured source exactly once (a decode failure is
//! fatal since no mapping can serve), persists the resolved mappings best
//! effort, then serves redirects until shutdown.

use std::fs;
use std::path::Path;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redirect_server::config::loader::{self, ConfigError};
use redirect_server::config::{Format, FormatCache, ServerConfig};
use redirect_server::observability::metrics;
use redirect_server::persist::writer;
use redirect_server::routing::DispatchChain;
use redirect_server::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redirect_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("redirect-server v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = Path::new("server.toml");
    let config = if config_path.exists() {
        loader::load_server_config(config_path)?
    } else {
        ServerConfig::default()
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        sources = config.sources.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Load every source once; a failure here is fatal.
    let cache = FormatCache::new();
    let mut chain = DispatchChain::new();

    for source in &config.sources {
        let format = match source.format.or_else(|| Format::from_path(&source.path)) {
            Some(format) => format,
            None => {
                return Err(
                    ConfigError::UnknownFormat(source.path.display().to_string()).into(),
                )
            }
        };
        let bytes = fs::read(&source.path)?;
        let mapping = loader::load(format, &bytes, &cache)?;
        let namespace = source.namespace_or_default(format);

        tracing::info!(
            %format,
            namespace = %namespace,
            path = %source.path.display(),
            entries = mapping.len(),
            "Mapping source loaded"
        );
        metrics::record_load(format.as_str(), mapping.len());

        // Best-effort write-back of the resolved mapping.
        if config.persistence.enabled {
            let lines_path = config
                .persistence
                .output_dir
                .join(format!("{}_config.txt", format.as_str()));
            if let Err(e) = writer::persist_lines(&mapping, &lines_path) {
                tracing::error!(error = %e, path = %lines_path.display(), "Failed to persist mapping");
            }

            let native_path = config
                .persistence
                .output_dir
                .join(format!("{0}_config.{0}", format.as_str()));
            if let Err(e) = writer::persist_native(&mapping, format, &native_path) {
                tracing::error!(error = %e, path = %native_path.display(), "Failed to re-serialize mapping");
            }
        }

        chain.add_namespace(namespace, format, (*mapping).clone());
    }

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Create and run HTTP server
    let server = HttpServer::new(config, chain);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
