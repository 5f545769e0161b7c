//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::{handlers, models::ApiResponse};
use crate::config::Config;
use crate::youtube::{YouTubeClient, YouTubeError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<YouTubeClient>,
    pub config: Arc<Config>,
}

/// Configure and start the HTTP server
pub async fn start_http_server(
    client: Arc<YouTubeClient>,
    config: Arc<Config>,
    port: u16,
) -> Result<()> {
    let app_state = AppState { client, config };

    // Configure CORS to allow browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/videos/:id/analysis", get(analysis_handler))
        .route("/api/videos/:id/suggestions", get(suggestions_handler))
        .with_state(app_state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("🌐 API server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::success(handlers::health_check())))
}

/// Single-video analysis handler
async fn analysis_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match handlers::analyze(&state.client, &state.config, &id).await {
        Ok(payload) => (StatusCode::OK, Json(ApiResponse::success(payload))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Categorized suggestions handler
async fn suggestions_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match handlers::suggestions(&state.client, &id).await {
        Ok(payload) => (StatusCode::OK, Json(ApiResponse::success(payload))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Map fetch-layer error kinds onto HTTP statuses.
fn error_response(error: YouTubeError) -> axum::response::Response {
    let status = match &error {
        YouTubeError::NotFound(_) => StatusCode::NOT_FOUND,
        YouTubeError::Unauthorized(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ApiResponse::<()>::error(error.to_string())),
    )
        .into_response()
}
