mod cache;
mod config;
mod errors;
mod models;
mod routes;
mod sources;
mod state;
mod store;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::sources::github::GithubClient;
use crate::sources::medium::MediumClient;
use crate::state::AppState;
use crate::store::CacheStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; nothing below reads the environment.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // One cache store connection for the process lifetime; a failed connect
    // here means every request runs as a live fetch from now on.
    let store = CacheStore::connect(&config.redis_url, &config.cache_namespace).await;

    // Shared HTTP client for both upstreams. GitHub rejects requests without
    // a User-Agent. No request timeout: a slow upstream blocks only the
    // request that hit it.
    let http = reqwest::Client::builder()
        .user_agent(concat!("portfolio-api/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let github = GithubClient::new(http.clone(), config.github_token.clone());
    let medium = MediumClient::new(http);

    let state = AppState {
        store: store.clone(),
        github,
        medium,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down gracefully");
    store.close();

    Ok(())
}

/// Public read API, so cross-origin is permissive unless a frontend origin is
/// pinned via FRONTEND_URL (and ALLOW_ALL_ORIGINS overrides the pin).
fn cors_layer(config: &Config) -> Result<CorsLayer> {
    match &config.frontend_url {
        Some(origin) if !config.allow_all_origins => {
            let origin = origin
                .parse::<HeaderValue>()
                .context("FRONTEND_URL is not a valid origin")?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]))
        }
        _ => Ok(CorsLayer::permissive()),
    }
}

/// Resolves on SIGINT or SIGTERM so the server can drain in-flight requests
/// and the store connection gets its best-effort close.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
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
