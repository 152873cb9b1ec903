//! Image Relay - a lightweight remote image access server
//!
//! Decodes images server-side into a bounded path-keyed cache and answers
//! pixel-level queries over HTTP.
//!
//! # Startup Sequence
//! 1. Parse command-line flags
//! 2. Initialize tracing subscriber for logging
//! 3. Build the async runtime with the configured worker count
//! 4. Create the bounded cache and accessor facade
//! 5. Create Axum router with all endpoints
//! 6. Start HTTP server on the configured address
//! 7. Handle graceful shutdown on SIGINT/SIGTERM

use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_relay::{api::create_router, AppState, Config};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing subscriber with env filter
    // Defaults to --log-level, can be overridden with RUST_LOG env var
    let default_filter = format!(
        "image_relay={level},tower_http={level}",
        level = config.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The worker count is a flag, so the runtime is built by hand
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers.max(1))
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    runtime.block_on(run(config))
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!("Starting Image Relay server");
    info!(
        "Configuration loaded: host={}, port={}, cache_len={}, workers={}",
        config.host, config.port, config.cache_len, config.workers
    );

    // Create application state with the bounded cache and raster decoder
    let state = AppState::from_config(&config);
    info!("Image cache initialized");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured address
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid host address: {}", config.host))?;
    let addr = SocketAddr::from((host, config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
