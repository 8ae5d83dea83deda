//! Health check HTTP handler

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::web::{
    AppState,
    extractors::RequestContext,
    responses::{ApiResponse, HealthResponse, ok},
    utils::log_request,
};

/// Health check endpoint
///
/// Reports healthy when the store answers a trivial query.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthResponse),
        (status = 503, description = "Store is unreachable", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>, context: RequestContext) -> Response {
    log_request(&context);

    match state.database.ping().await {
        Ok(()) => ok(HealthResponse::healthy()).into_response(),
        Err(e) => {
            warn!("Health check failed: {:#}", e);
            let body = ApiResponse {
                success: false,
                data: Some(HealthResponse::unhealthy("disconnected".to_string())),
                error: Some("Database connection failed".to_string()),
                timestamp: chrono::Utc::now(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
