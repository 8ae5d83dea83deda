//! Genre HTTP handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::errors::AppError;
use crate::models::Genre;
use crate::web::{
    AppState, extractors::RequestContext, handlers::require, responses::handle_result,
    utils::log_request,
};

#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genres with resolved display color", body = [Genre]),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_genres(State(state): State<AppState>, context: RequestContext) -> impl IntoResponse {
    log_request(&context);
    handle_result(state.genres().find_all().await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre found", body = Genre),
        (status = 404, description = "Genre not found"),
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(require(state.genres().find_by_id(id).await, "Genre", id))
}
