//! pollchat server library
//!
//! Plain request/response chat: clients poll `/messages` and announce
//! themselves through `/join` and `/leave`. All state lives in
//! `pollchat_core::ChatState`; this crate is routing, decoding and CORS.

pub mod chat;
pub mod core;

use axum::{http::Method, Router};
use http::header::CONTENT_TYPE;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use crate::core::{AppState, ServerConfig};

const DEFAULT_LOG_FILTER: &str = "pollchat_server=info,pollchat_core=info,tower_http=info";

/// Any origin, and every OPTIONS request is answered as a preflight.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

/// Full application router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(crate::chat::router())
        .merge(crate::core::router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    // Already set by an embedding process; keep theirs.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::default();
    let addr = config.socket_addr()?;
    info!(
        "Presence timeout: {}s",
        config.presence_timeout().num_seconds()
    );

    let app = app(AppState::new(config));

    info!("");
    info!("╔════════════════════════════════════════════════════════════╗");
    info!("║  Poll Chat Server Running                                  ║");
    info!("║  Address: http://{:<42}║", addr);
    info!("╚════════════════════════════════════════════════════════════╝");
    info!("");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
