//! HTTP response types and utilities
//!
//! Every JSON endpoint answers with the same envelope. Errors are mapped onto
//! status codes here so handlers only ever produce an `AppResult`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult, RepositoryError, SeedError};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn unhealthy(database: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            database,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// 200 with the data, or the mapped error
pub fn handle_result<T>(result: AppResult<T>) -> Response
where
    T: Serialize,
{
    match result {
        Ok(data) => ok(data).into_response(),
        Err(error) => handle_error(error),
    }
}

/// 201 with the data, or the mapped error
pub fn handle_created<T>(result: AppResult<T>) -> Response
where
    T: Serialize,
{
    match result {
        Ok(data) => created(data).into_response(),
        Err(error) => handle_error(error),
    }
}

fn status_for(error: &AppError) -> (StatusCode, String) {
    match error {
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AppError::NotFound { resource, id } => (
            StatusCode::NOT_FOUND,
            format!("{} with id '{}' not found", resource, id),
        ),
        AppError::Repository(RepositoryError::RecordNotFound { table, value, .. }) => (
            StatusCode::NOT_FOUND,
            format!("{} with id '{}' not found", table, value),
        ),
        AppError::Repository(RepositoryError::ConstraintViolation { constraint, .. }) => (
            StatusCode::CONFLICT,
            format!("Request violates a {} constraint", constraint),
        ),
        AppError::Seed(SeedError::Database(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Event synthesis failed".to_string(),
        ),
        AppError::Seed(seed_error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Event synthesis failed: {}", seed_error),
        ),
        AppError::Database(_) | AppError::Repository(RepositoryError::Database(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database operation failed".to_string(),
        ),
        AppError::Configuration { .. } | AppError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        ),
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = status_for(&error);
    if status.is_server_error() {
        error!("Request failed: {}", error);
    }

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}
