//! Web layer module
//!
//! This module provides the HTTP interface for the EPG service: a JSON API
//! under `/api/v1` and server-rendered HTML pages. Handlers are thin and read
//! from the populated store through the repositories; none of them seed.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers organized by resource
//! - **Responses**: The `{success, data, error, timestamp}` envelope and error mapping
//! - **Extractors**: Per-request context used for logging
//! - **OpenAPI**: utoipa document served at `/api/openapi.json`

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    config::Config,
    database::{
        Database,
        repositories::{
            CategorySeaOrmRepository, ChannelSeaOrmRepository, CountrySeaOrmRepository,
            EventRatingSeaOrmRepository, EventSeaOrmRepository, GenreSeaOrmRepository,
            NetworkSeaOrmRepository, RatingSeaOrmRepository, TimezoneSeaOrmRepository,
        },
    },
};

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod utils;

// Re-export commonly used types
pub use extractors::RequestContext;
pub use responses::{ApiResponse, handle_error, handle_result};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, database: Database) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address {}:{}",
                    config.web.host, config.web.port
                )
            })?;

        let app = create_router(AppState { database, config });

        Ok(Self { app, addr })
    }

    /// Serve until SIGINT or SIGTERM
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind to {}", self.addr))?;
        info!("Web server listening on http://{}", self.addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Web server stopped");
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully"),
                    _ = sigint.recv() => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
                }
            }
            _ => {
                tracing::warn!("Failed to install signal handlers, falling back to Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl+C, shutting down gracefully");
    }
}

/// Build the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest(openapi::API_PREFIX, api_v1_routes())
        .route("/api/openapi.json", get(openapi::openapi_json))
        // HTML pages
        .route("/", get(handlers::pages::index))
        .route("/networks", get(handlers::pages::networks_page))
        .route("/networks/{id}", get(handlers::pages::network_page))
        .route("/channels", get(handlers::pages::channels_page))
        .route("/channels/{id}", get(handlers::pages::channel_page))
        .route("/genres", get(handlers::pages::genres_page))
        .route("/genres/{id}", get(handlers::pages::genre_page))
        .route("/categories", get(handlers::pages::categories_page))
        .route("/categories/{id}", get(handlers::pages::category_page))
        .route("/ratings", get(handlers::pages::ratings_page))
        // Static assets
        .route(
            "/static/{*path}",
            get(handlers::static_assets::serve_static_asset),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_v1_routes() -> Router<AppState> {
    use handlers::{
        categories, channels, countries, event_ratings, events, genres, networks, ratings,
        timezones,
    };

    Router::new()
        // Countries
        .route(
            "/countries",
            get(countries::list_countries).post(countries::create_country),
        )
        .route(
            "/countries/{id}",
            get(countries::get_country)
                .put(countries::update_country)
                .delete(countries::delete_country),
        )
        .route("/countries/code/{code}", get(countries::get_country_by_code))
        // Read-only reference data
        .route("/timezones", get(timezones::list_timezones))
        .route("/timezones/{id}", get(timezones::get_timezone))
        .route("/networks", get(networks::list_networks))
        .route("/networks/{id}", get(networks::get_network))
        .route("/channels", get(channels::list_channels))
        .route("/channels/{id}", get(channels::get_channel))
        .route("/genres", get(genres::list_genres))
        .route("/genres/{id}", get(genres::get_genre))
        .route("/categories", get(categories::list_categories))
        .route("/categories/{id}", get(categories::get_category))
        .route("/rating-systems", get(ratings::list_rating_systems))
        .route("/rating-systems/{id}", get(ratings::get_rating_system))
        .route("/rating-values", get(ratings::list_rating_values))
        .route("/rating-values/{id}", get(ratings::get_rating_value))
        // Events
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/since/{time}", get(events::list_events_since))
        .route("/events/synthesize", post(events::synthesize_events))
        .route(
            "/events/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        // Event ratings
        .route(
            "/event-ratings",
            get(event_ratings::list_event_ratings).post(event_ratings::create_event_rating),
        )
        .route(
            "/event-ratings/{event_id}/{rating_value_id}",
            get(event_ratings::get_event_rating)
                .put(event_ratings::update_event_rating)
                .delete(event_ratings::delete_event_rating),
        )
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Config,
}

impl AppState {
    pub fn countries(&self) -> CountrySeaOrmRepository {
        CountrySeaOrmRepository::new(self.database.connection())
    }

    pub fn timezones(&self) -> TimezoneSeaOrmRepository {
        TimezoneSeaOrmRepository::new(self.database.connection())
    }

    pub fn networks(&self) -> NetworkSeaOrmRepository {
        NetworkSeaOrmRepository::new(self.database.connection())
    }

    pub fn channels(&self) -> ChannelSeaOrmRepository {
        ChannelSeaOrmRepository::new(self.database.connection())
    }

    pub fn genres(&self) -> GenreSeaOrmRepository {
        GenreSeaOrmRepository::new(self.database.connection())
    }

    pub fn categories(&self) -> CategorySeaOrmRepository {
        CategorySeaOrmRepository::new(self.database.connection())
    }

    pub fn ratings(&self) -> RatingSeaOrmRepository {
        RatingSeaOrmRepository::new(self.database.connection())
    }

    pub fn events(&self) -> EventSeaOrmRepository {
        EventSeaOrmRepository::new(self.database.connection())
    }

    pub fn event_ratings(&self) -> EventRatingSeaOrmRepository {
        EventRatingSeaOrmRepository::new(self.database.connection())
    }
}
