use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::errors::AppError;
use crate::models::Category;
use crate::web::{
    AppState, extractors::RequestContext, handlers::require, responses::handle_result,
    utils::log_request,
};

#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories ordered by id, with their active events", body = [Category]),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_categories(State(state): State<AppState>, context: RequestContext) -> impl IntoResponse {
    log_request(&context);
    handle_result(state.categories().find_all().await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found"),
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(require(state.categories().find_by_id(id).await, "Category", id))
}
