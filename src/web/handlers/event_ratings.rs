//! Event rating HTTP handlers, keyed by (event id, rating value id)

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::errors::AppError;
use crate::models::{EventRating, EventRatingListing, UpdateEventRatingRequest};
use crate::web::{
    AppState,
    extractors::RequestContext,
    handlers::{DeletedResponse, require},
    responses::{handle_created, handle_result},
    utils::log_request,
};

#[utoipa::path(
    get,
    path = "/event-ratings",
    tag = "event-ratings",
    responses(
        (status = 200, description = "All event ratings with their event and rating value", body = [EventRatingListing]),
    )
)]
pub async fn list_event_ratings(
    State(state): State<AppState>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(state.event_ratings().find_all().await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/event-ratings/{event_id}/{rating_value_id}",
    tag = "event-ratings",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
        ("rating_value_id" = i32, Path, description = "Rating value ID"),
    ),
    responses(
        (status = 200, description = "Event rating with its event and rating value", body = EventRatingListing),
        (status = 404, description = "Event rating not found"),
    )
)]
pub async fn get_event_rating(
    State(state): State<AppState>,
    Path((event_id, rating_value_id)): Path<(i32, i32)>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    let found = state.event_ratings().find(event_id, rating_value_id).await;
    handle_result(require(
        found,
        "Event rating",
        format!("{}/{}", event_id, rating_value_id),
    ))
}

#[utoipa::path(
    post,
    path = "/event-ratings",
    tag = "event-ratings",
    request_body = EventRating,
    responses(
        (status = 201, description = "Event rating created", body = EventRating),
        (status = 409, description = "Duplicate link, or unknown event or rating value"),
    )
)]
pub async fn create_event_rating(
    State(state): State<AppState>,
    context: RequestContext,
    Json(request): Json<EventRating>,
) -> impl IntoResponse {
    log_request(&context);
    handle_created(state.event_ratings().create(request).await.map_err(AppError::from))
}

#[utoipa::path(
    put,
    path = "/event-ratings/{event_id}/{rating_value_id}",
    tag = "event-ratings",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
        ("rating_value_id" = i32, Path, description = "Current rating value ID"),
    ),
    request_body = UpdateEventRatingRequest,
    responses(
        (status = 200, description = "Event rating now points at the new value", body = EventRating),
        (status = 404, description = "Event rating not found"),
        (status = 409, description = "Unknown rating value or duplicate link"),
    )
)]
pub async fn update_event_rating(
    State(state): State<AppState>,
    Path((event_id, rating_value_id)): Path<(i32, i32)>,
    context: RequestContext,
    Json(request): Json<UpdateEventRatingRequest>,
) -> impl IntoResponse {
    log_request(&context);
    let result = state
        .event_ratings()
        .update(event_id, rating_value_id, request.rating_value_id)
        .await
        .map_err(AppError::from);
    handle_result(result)
}

#[utoipa::path(
    delete,
    path = "/event-ratings/{event_id}/{rating_value_id}",
    tag = "event-ratings",
    params(
        ("event_id" = i32, Path, description = "Event ID"),
        ("rating_value_id" = i32, Path, description = "Rating value ID"),
    ),
    responses(
        (status = 200, description = "Event rating deleted", body = DeletedResponse),
        (status = 404, description = "Event rating not found"),
    )
)]
pub async fn delete_event_rating(
    State(state): State<AppState>,
    Path((event_id, rating_value_id)): Path<(i32, i32)>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    let result = state
        .event_ratings()
        .delete(event_id, rating_value_id)
        .await
        .map(|_| DeletedResponse::new(format!("{}/{}", event_id, rating_value_id)))
        .map_err(AppError::from);
    handle_result(result)
}
