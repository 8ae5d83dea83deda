//! OpenAPI documentation generation using utoipa
//!
//! Handler functions carry `#[utoipa::path]` annotations relative to their
//! router. The versioned API is nested under `/api/v1`.

use axum::Json;
use utoipa::OpenApi;

use crate::models::{
    Category, Channel, Country, CreateCountryRequest, CreateEventRequest, Event, EventListing,
    EventRating, EventRatingListing, Genre, Network, RatingSystem, RatingValue, RatingValueListing,
    SynthesizeRequest, SynthesizeResponse, Timezone, UpdateCountryRequest,
    UpdateEventRatingRequest, UpdateEventRequest,
};
use crate::web::{handlers, handlers::DeletedResponse, responses::HealthResponse};

/// Prefix the versioned API is mounted under
pub const API_PREFIX: &str = "/api/v1";

#[derive(OpenApi)]
#[openapi(
    paths(
        // Countries
        handlers::countries::list_countries,
        handlers::countries::get_country,
        handlers::countries::get_country_by_code,
        handlers::countries::create_country,
        handlers::countries::update_country,
        handlers::countries::delete_country,

        // Reference data
        handlers::timezones::list_timezones,
        handlers::timezones::get_timezone,
        handlers::networks::list_networks,
        handlers::networks::get_network,
        handlers::channels::list_channels,
        handlers::channels::get_channel,
        handlers::genres::list_genres,
        handlers::genres::get_genre,
        handlers::categories::list_categories,
        handlers::categories::get_category,
        handlers::ratings::list_rating_systems,
        handlers::ratings::get_rating_system,
        handlers::ratings::list_rating_values,
        handlers::ratings::get_rating_value,

        // Events
        handlers::events::list_events,
        handlers::events::list_events_since,
        handlers::events::get_event,
        handlers::events::create_event,
        handlers::events::update_event,
        handlers::events::delete_event,
        handlers::events::synthesize_events,

        // Event ratings
        handlers::event_ratings::list_event_ratings,
        handlers::event_ratings::get_event_rating,
        handlers::event_ratings::create_event_rating,
        handlers::event_ratings::update_event_rating,
        handlers::event_ratings::delete_event_rating,
    ),
    components(schemas(
        Country,
        CreateCountryRequest,
        UpdateCountryRequest,
        Timezone,
        Network,
        Channel,
        Genre,
        Category,
        RatingSystem,
        RatingValue,
        RatingValueListing,
        Event,
        EventListing,
        CreateEventRequest,
        UpdateEventRequest,
        EventRating,
        EventRatingListing,
        UpdateEventRatingRequest,
        SynthesizeRequest,
        SynthesizeResponse,
        DeletedResponse,
    ))
)]
struct ApiV1Doc;

/// Complete document for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EPG Service API",
        description = "Reference data, broadcast topology and program events for an electronic program guide"
    ),
    paths(handlers::health::health_check),
    components(schemas(HealthResponse)),
    nest((path = "/api/v1", api = ApiV1Doc)),
    tags(
        (name = "health", description = "Service health"),
        (name = "countries", description = "Country reference data"),
        (name = "timezones", description = "Timezones and DST rules"),
        (name = "networks", description = "Broadcast networks"),
        (name = "channels", description = "Channels carried by networks"),
        (name = "genres", description = "Genres with display colors"),
        (name = "categories", description = "Program categories"),
        (name = "ratings", description = "Rating systems and values"),
        (name = "events", description = "Program events and synthesis"),
        (name = "event-ratings", description = "Ratings attached to events"),
    )
)]
pub struct ApiDoc;

/// Get the OpenAPI document with the crate version filled in
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    openapi
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(get_openapi_spec())
}
