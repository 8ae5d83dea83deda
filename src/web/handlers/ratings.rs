//! Rating system and rating value HTTP handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::errors::AppError;
use crate::models::{RatingSystem, RatingValueListing};
use crate::web::{
    AppState, extractors::RequestContext, handlers::require, responses::handle_result,
    utils::log_request,
};

#[utoipa::path(
    get,
    path = "/rating-systems",
    tag = "ratings",
    responses(
        (status = 200, description = "Rating systems with their values preloaded", body = [RatingSystem]),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_rating_systems(
    State(state): State<AppState>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(state.ratings().find_all_systems().await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/rating-systems/{id}",
    tag = "ratings",
    params(("id" = i32, Path, description = "Rating system ID")),
    responses(
        (status = 200, description = "Rating system with its values", body = RatingSystem),
        (status = 404, description = "Rating system not found"),
    )
)]
pub async fn get_rating_system(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    let found = state.ratings().find_system_by_id(id).await;
    handle_result(require(found, "Rating system", id))
}

#[utoipa::path(
    get,
    path = "/rating-values",
    tag = "ratings",
    responses(
        (status = 200, description = "All rating values with their rating system", body = [RatingValueListing]),
    )
)]
pub async fn list_rating_values(
    State(state): State<AppState>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(state.ratings().find_all_values().await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/rating-values/{id}",
    tag = "ratings",
    params(("id" = i32, Path, description = "Rating value ID")),
    responses(
        (status = 200, description = "Rating value with its rating system", body = RatingValueListing),
        (status = 404, description = "Rating value not found"),
    )
)]
pub async fn get_rating_value(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    let found = state.ratings().find_value_by_id(id).await;
    handle_result(require(found, "Rating value", id))
}
