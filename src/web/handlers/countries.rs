//! Country HTTP handlers
//!
//! Countries are the only reference data editable at runtime. A country that
//! still owns timezones, rating systems or networks cannot be deleted.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::database::repositories::Repository;
use crate::errors::AppError;
use crate::models::{Country, CreateCountryRequest, UpdateCountryRequest};
use crate::web::{
    AppState,
    extractors::RequestContext,
    handlers::{DeletedResponse, require},
    responses::{handle_created, handle_error, handle_result},
    utils::log_request,
};

#[utoipa::path(
    get,
    path = "/countries",
    tag = "countries",
    responses(
        (status = 200, description = "All countries ordered by name", body = [Country]),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_countries(
    State(state): State<AppState>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(state.countries().list_all().await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/countries/{id}",
    tag = "countries",
    params(("id" = i32, Path, description = "Country ID")),
    responses(
        (status = 200, description = "Country found", body = Country),
        (status = 404, description = "Country not found"),
    )
)]
pub async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(require(state.countries().find_by_id(id).await, "Country", id))
}

#[utoipa::path(
    get,
    path = "/countries/code/{code}",
    tag = "countries",
    params(("code" = String, Path, description = "Two-letter country code", example = "GB")),
    responses(
        (status = 200, description = "Country found", body = Country),
        (status = 404, description = "Country not found"),
    )
)]
pub async fn get_country_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    let found = state.countries().find_by_code(&code).await;
    handle_result(require(found, "Country", code))
}

#[utoipa::path(
    post,
    path = "/countries",
    tag = "countries",
    request_body = CreateCountryRequest,
    responses(
        (status = 201, description = "Country created", body = Country),
        (status = 400, description = "Invalid request data"),
        (status = 409, description = "Country code already exists"),
    )
)]
pub async fn create_country(
    State(state): State<AppState>,
    context: RequestContext,
    Json(request): Json<CreateCountryRequest>,
) -> impl IntoResponse {
    log_request(&context);
    if let Err(e) = request.validate() {
        return handle_error(e);
    }
    handle_created(state.countries().create(request).await.map_err(AppError::from))
}

#[utoipa::path(
    put,
    path = "/countries/{id}",
    tag = "countries",
    params(("id" = i32, Path, description = "Country ID")),
    request_body = UpdateCountryRequest,
    responses(
        (status = 200, description = "Country updated", body = Country),
        (status = 400, description = "Invalid request data"),
        (status = 404, description = "Country not found"),
        (status = 409, description = "Country code already exists"),
    )
)]
pub async fn update_country(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
    Json(request): Json<UpdateCountryRequest>,
) -> impl IntoResponse {
    log_request(&context);
    if let Err(e) = request.validate() {
        return handle_error(e);
    }
    handle_result(state.countries().update(id, request).await.map_err(AppError::from))
}

#[utoipa::path(
    delete,
    path = "/countries/{id}",
    tag = "countries",
    params(("id" = i32, Path, description = "Country ID")),
    responses(
        (status = 200, description = "Country deleted", body = DeletedResponse),
        (status = 404, description = "Country not found"),
        (status = 409, description = "Country still has timezones, rating systems or networks"),
    )
)]
pub async fn delete_country(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    let result = state
        .countries()
        .delete(id)
        .await
        .map(|_| DeletedResponse::new(id))
        .map_err(AppError::from);
    handle_result(result)
}
