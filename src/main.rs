use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app_status::{config::Config, routes, IdentityCache, InstalledPackages, StatusResponder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignored silently if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app_status=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let source = config.validate().context("Invalid configuration")?;

    let mut registry = InstalledPackages::with_current_crate();
    if let Some(path) = &config.packages_file {
        registry
            .load_manifest(path)
            .context("Failed to load package manifest")?;
    }
    tracing::debug!(packages = registry.len(), "Package registry ready");

    // One cache for the whole process; every status route resolving a
    // package shares it.
    let cache = Arc::new(IdentityCache::new());
    let responder = StatusResponder::new(source, Arc::new(registry), cache);

    let addr: SocketAddr = config.addr().parse().context("Invalid bind address")?;

    let app = Router::new()
        .merge(routes::status::router(&config.path, responder))
        .layer(TraceLayer::new_for_http());

    tracing::info!("app-status listening on http://{}{}", addr, config.path);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping");
}
