/// Vidrelay API Server
///
/// Resolves a playable MP4 stream for a video through the upstream service
/// and relays media bytes to browsers that cannot fetch them cross-origin.
mod config;
mod routes;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use vidrelay_shared::UpstreamClient;

use crate::config::Config;

/// Shared application state for all API handlers. Immutable after startup.
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// Build the HTTP router with CORS open to every origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/video/:id", get(routes::get_video))
        .route("/proxy-video", get(routes::proxy_video))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidrelay_api=info,vidrelay_shared=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    info!("Upstream instance: {}", config.upstream_base_url);

    let upstream = UpstreamClient::new(&config.upstream_base_url, config.upstream_connect_timeout)?;
    let state = Arc::new(AppState { upstream });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Server running on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
