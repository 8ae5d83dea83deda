//! Event HTTP handlers
//!
//! Deleting an event is a soft delete. Deleted events disappear from every
//! listing here and free their slot for the next synthesis run.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::database::repositories::Repository;
use crate::errors::AppError;
use crate::models::{
    CreateEventRequest, Event, EventListing, SynthesizeRequest, SynthesizeResponse,
    UpdateEventRequest, parse_event_time,
};
use crate::seed::synthesize;
use crate::web::{
    AppState,
    extractors::RequestContext,
    handlers::{DeletedResponse, require},
    responses::{handle_created, handle_error, handle_result},
    utils::log_request,
};

#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses(
        (status = 200, description = "Active events with channel, category, genre and ratings", body = [EventListing]),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_events(State(state): State<AppState>, context: RequestContext) -> impl IntoResponse {
    log_request(&context);
    handle_result(state.events().list_listings().await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/events/since/{time}",
    tag = "events",
    params(
        ("time" = String, Path, description = "UTC time as %Y-%m-%d %H:%M:%S", example = "2025-01-01 06:00:00"),
    ),
    responses(
        (status = 200, description = "Active events starting at or after the given time", body = [EventListing]),
        (status = 400, description = "Malformed time"),
    )
)]
pub async fn list_events_since(
    State(state): State<AppState>,
    Path(time): Path<String>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    let since = match parse_event_time(&time) {
        Ok(since) => since,
        Err(e) => return handle_error(e),
    };
    handle_result(state.events().find_since(since).await.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event with channel, category, genre and ratings", body = EventListing),
        (status = 404, description = "Event not found or deleted"),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(require(state.events().find_listing(id).await, "Event", id))
}

#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event and its ratings created", body = Event),
        (status = 400, description = "Invalid request data"),
        (status = 409, description = "Unknown channel, genre, category or rating value"),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    context: RequestContext,
    Json(request): Json<CreateEventRequest>,
) -> impl IntoResponse {
    log_request(&context);
    if let Err(e) = request.validate() {
        return handle_error(e);
    }
    handle_created(state.events().create(request).await.map_err(AppError::from))
}

#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i32, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Invalid request data"),
        (status = 404, description = "Event not found or deleted"),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
    Json(request): Json<UpdateEventRequest>,
) -> impl IntoResponse {
    log_request(&context);
    let events = state.events();

    let current = match require(events.find_by_id(id).await, "Event", id) {
        Ok(current) => current,
        Err(e) => return handle_error(e),
    };
    if let Err(e) = request.validate(&current) {
        return handle_error(e);
    }

    handle_result(events.update(id, request).await.map_err(AppError::from))
}

#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event soft-deleted", body = DeletedResponse),
        (status = 404, description = "Event not found or already deleted"),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    let result = state
        .events()
        .delete(id)
        .await
        .map(|_| DeletedResponse::new(id))
        .map_err(AppError::from);
    handle_result(result)
}

#[utoipa::path(
    post,
    path = "/events/synthesize",
    tag = "events",
    request_body = SynthesizeRequest,
    responses(
        (status = 200, description = "Number of events inserted", body = SynthesizeResponse),
        (status = 422, description = "Template could not be read or parsed"),
    )
)]
pub async fn synthesize_events(
    State(state): State<AppState>,
    context: RequestContext,
    Json(request): Json<SynthesizeRequest>,
) -> impl IntoResponse {
    log_request(&context);
    let result = synthesize(
        &state.database,
        &state.config.seed.fixtures_dir,
        &request.channel_ids,
        request.day_start,
    )
    .await
    .map(|inserted| SynthesizeResponse { inserted })
    .map_err(AppError::from);
    handle_result(result)
}
