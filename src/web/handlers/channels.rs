//! Channel HTTP handlers

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::AppError;
use crate::models::Channel;
use crate::web::{
    AppState, extractors::RequestContext, handlers::require, responses::handle_result,
    utils::log_request,
};

/// Optional list filter
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ChannelQuery {
    /// Only channels of this network
    pub network_id: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/channels",
    tag = "channels",
    params(ChannelQuery),
    responses(
        (status = 200, description = "Channels with their network name and active events", body = [Channel]),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_channels(
    State(state): State<AppState>,
    Query(query): Query<ChannelQuery>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    let channels = match query.network_id {
        Some(network_id) => state.channels().find_by_network(network_id).await,
        None => state.channels().find_all().await,
    };
    handle_result(channels.map_err(AppError::from))
}

#[utoipa::path(
    get,
    path = "/channels/{id}",
    tag = "channels",
    params(("id" = i32, Path, description = "Channel ID")),
    responses(
        (status = 200, description = "Channel found", body = Channel),
        (status = 404, description = "Channel not found"),
    )
)]
pub async fn get_channel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> impl IntoResponse {
    log_request(&context);
    handle_result(require(state.channels().find_by_id(id).await, "Channel", id))
}
