//! Server-rendered HTML pages
//!
//! Pages read the same repositories as the JSON API and render them with
//! askama templates from `templates/`.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::errors::{AppError, AppResult, RepositoryResult};
use crate::models::{Category, Channel, Genre, Network, RatingSystem};
use crate::web::{AppState, extractors::RequestContext, utils::log_request};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub version: &'static str,
    pub network_count: usize,
    pub channel_count: usize,
    pub genre_count: usize,
    pub category_count: usize,
    pub rating_system_count: usize,
}

#[derive(Template)]
#[template(path = "networks.html")]
pub struct NetworksTemplate {
    pub networks: Vec<Network>,
}

#[derive(Template)]
#[template(path = "network.html")]
pub struct NetworkTemplate {
    pub network: Network,
    pub channels: Vec<Channel>,
}

#[derive(Template)]
#[template(path = "channels.html")]
pub struct ChannelsTemplate {
    pub channels: Vec<Channel>,
}

#[derive(Template)]
#[template(path = "channel.html")]
pub struct ChannelTemplate {
    pub channel: Channel,
}

#[derive(Template)]
#[template(path = "genres.html")]
pub struct GenresTemplate {
    pub genres: Vec<Genre>,
}

#[derive(Template)]
#[template(path = "genre.html")]
pub struct GenreTemplate {
    pub genre: Genre,
}

#[derive(Template)]
#[template(path = "categories.html")]
pub struct CategoriesTemplate {
    pub categories: Vec<Category>,
}

#[derive(Template)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub category: Category,
}

#[derive(Template)]
#[template(path = "ratings.html")]
pub struct RatingsTemplate {
    pub rating_systems: Vec<RatingSystem>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Page could not be rendered")
        }
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let page = ErrorTemplate {
        status: status.as_u16(),
        message: message.to_string(),
    };
    let body = page
        .render()
        .unwrap_or_else(|_| format!("<h1>{}</h1>", status.as_u16()));
    (status, Html(body)).into_response()
}

fn failure_page(error: AppError) -> Response {
    match error {
        AppError::NotFound { resource, id } => error_page(
            StatusCode::NOT_FOUND,
            &format!("{} {} was not found", resource, id),
        ),
        other => {
            error!("Page request failed: {}", other);
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Render a list page, or the error page if the lookup failed
fn list_page<T, P: Template>(
    found: RepositoryResult<Vec<T>>,
    page: impl FnOnce(Vec<T>) -> P,
) -> Response {
    match found {
        Ok(items) => render(page(items)),
        Err(e) => failure_page(e.into()),
    }
}

/// Render a detail page, 404 when nothing matched
fn detail_page<T, P: Template>(
    found: RepositoryResult<Option<T>>,
    resource: &str,
    id: i32,
    page: impl FnOnce(T) -> P,
) -> Response {
    match super::require(found, resource, id) {
        Ok(item) => render(page(item)),
        Err(e) => failure_page(e),
    }
}

async fn index_counts(state: &AppState) -> AppResult<IndexTemplate> {
    Ok(IndexTemplate {
        version: env!("CARGO_PKG_VERSION"),
        network_count: state.networks().find_all().await?.len(),
        channel_count: state.channels().find_all().await?.len(),
        genre_count: state.genres().find_all().await?.len(),
        category_count: state.categories().find_all().await?.len(),
        rating_system_count: state.ratings().find_all_systems().await?.len(),
    })
}

pub async fn index(State(state): State<AppState>, context: RequestContext) -> Response {
    log_request(&context);
    match index_counts(&state).await {
        Ok(page) => render(page),
        Err(e) => failure_page(e),
    }
}

pub async fn networks_page(State(state): State<AppState>, context: RequestContext) -> Response {
    log_request(&context);
    list_page(state.networks().find_all().await, |networks| NetworksTemplate { networks })
}

pub async fn network_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> Response {
    log_request(&context);
    let network = match super::require(state.networks().find_by_id(id).await, "Network", id) {
        Ok(network) => network,
        Err(e) => return failure_page(e),
    };

    match state.channels().find_by_network(network.id).await {
        Ok(channels) => render(NetworkTemplate { network, channels }),
        Err(e) => failure_page(e.into()),
    }
}

pub async fn channels_page(State(state): State<AppState>, context: RequestContext) -> Response {
    log_request(&context);
    list_page(state.channels().find_all().await, |channels| ChannelsTemplate { channels })
}

pub async fn channel_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> Response {
    log_request(&context);
    detail_page(state.channels().find_by_id(id).await, "Channel", id, |channel| {
        ChannelTemplate { channel }
    })
}

pub async fn genres_page(State(state): State<AppState>, context: RequestContext) -> Response {
    log_request(&context);
    list_page(state.genres().find_all().await, |genres| GenresTemplate { genres })
}

pub async fn genre_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> Response {
    log_request(&context);
    detail_page(state.genres().find_by_id(id).await, "Genre", id, |genre| {
        GenreTemplate { genre }
    })
}

pub async fn categories_page(State(state): State<AppState>, context: RequestContext) -> Response {
    log_request(&context);
    list_page(state.categories().find_all().await, |categories| {
        CategoriesTemplate { categories }
    })
}

pub async fn category_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    context: RequestContext,
) -> Response {
    log_request(&context);
    detail_page(state.categories().find_by_id(id).await, "Category", id, |category| {
        CategoryTemplate { category }
    })
}

pub async fn ratings_page(State(state): State<AppState>, context: RequestContext) -> Response {
    log_request(&context);
    list_page(state.ratings().find_all_systems().await, |rating_systems| {
        RatingsTemplate { rating_systems }
    })
}
