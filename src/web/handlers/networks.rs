//! Network HTTP handlers
//!
//! A network whose timezone cannot be resolved is reported with the
//! `Unknown` timezone label rather than failing the request.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::errors::AppError;
use crate::models::Network;
use crate::web::{
    AppState, extractors::RequestContext, handlers::require, responses::handle_result,
    utils::log_request,
};

#[utoipa::path(
    get,
    path = "/networks",
    tag = "networks",
    responses(
        (status = 200, description = "Networks with country and timezone resolved", body = [Network]),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_networks(State(state): State<AppState>, context: RequestContext) -> impl IntoResponse {
    log_request(&context);
    handle_result(state.networks().find_all().await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/networks/{id}",
    tag = "networks",
    params(("id" = i32, Path, description = "Network ID")),
    responses(
        (status = 200, description = "Network found", body = Network),
        (status = 404, description = "Network not found"),
    )
)]
pub async fn get_network(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(require(state.networks().find_by_id(id).await, "Network", id))
}
