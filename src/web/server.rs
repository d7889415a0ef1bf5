//! HTTP server for the upload page
//!
//! Routes:
//! - `GET /` and `GET /upload` — upload form
//! - `POST /upload` — run a match (multipart field `logo`, 8 MiB limit)
//! - `GET /display/*` — cached logos and uploaded query images

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::constants::upload::MAX_BYTES;
use crate::error::{RecommendError, Result};
use crate::recommend::Recommender;
use crate::web::handlers::{self, WebState};

/// Build the router over a shared catalog
pub fn build_router(state: Arc<WebState>, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", get(handlers::index).post(handlers::upload))
        .nest_service("/display", ServeDir::new(&config.cache_dir))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Serve the upload page until the process is stopped.
///
/// # Errors
///
/// Returns `RecommendError::Server` if the address is invalid or the
/// listener cannot bind, and `RecommendError::Io` if the upload directory
/// cannot be created.
pub async fn serve(config: AppConfig, recommender: Recommender) -> Result<()> {
    let upload_dir = config.upload_dir();
    std::fs::create_dir_all(&upload_dir)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| RecommendError::Server {
            message: format!("invalid bind address: {}", e),
        })?;

    let state = Arc::new(WebState {
        recommender,
        upload_dir,
    });
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| RecommendError::Server {
            message: format!("failed to bind {}: {}", addr, e),
        })?;

    info!("app launching at http://{}", addr);
    info!("  GET  http://{}/", addr);
    info!("  POST http://{}/upload", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| RecommendError::Server {
            message: format!("server error: {}", e),
        })
}
