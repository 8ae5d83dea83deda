//! Timezone HTTP handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::errors::AppError;
use crate::models::Timezone;
use crate::web::{
    AppState, extractors::RequestContext, handlers::require, responses::handle_result,
    utils::log_request,
};

#[utoipa::path(
    get,
    path = "/timezones",
    tag = "timezones",
    responses(
        (status = 200, description = "Timezones ordered by country code and name", body = [Timezone]),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_timezones(State(state): State<AppState>, context: RequestContext) -> impl IntoResponse {
    log_request(&context);
    handle_result(state.timezones().find_all().await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/timezones/{id}",
    tag = "timezones",
    params(("id" = i32, Path, description = "Timezone ID")),
    responses(
        (status = 200, description = "Timezone found", body = Timezone),
        (status = 404, description = "Timezone not found"),
    )
)]
pub async fn get_timezone(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(require(state.timezones().find_by_id(id).await, "Timezone", id))
}
