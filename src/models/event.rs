//! Program event models

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Category, Channel, Genre, RatingValue};
use crate::errors::AppError;

/// Path format accepted by the events-since lookup
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Active (not soft-deleted) program event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: i32,
    pub channel_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: String,
    pub short_description: Option<String>,
    pub extended_description: Option<String>,
    pub genre_id: i32,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event with its channel, category, genre (color resolved) and ratings preloaded
///
/// The nested channel and category do not carry their own event lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventListing {
    pub event: Event,
    pub channel: Option<Channel>,
    pub category: Option<Category>,
    pub genre: Option<Genre>,
    pub ratings: Vec<RatingValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    pub channel_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: String,
    pub short_description: Option<String>,
    pub extended_description: Option<String>,
    pub genre_id: i32,
    pub category_id: i32,
    /// Ratings attached to the new event
    #[serde(default)]
    pub rating_value_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    pub channel_id: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub extended_description: Option<String>,
    pub genre_id: Option<i32>,
    pub category_id: Option<i32>,
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::validation("Event end_time must be after start_time"));
    }
    Ok(())
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Event title must not be empty"));
        }
        validate_window(self.start_time, self.end_time)
    }
}

impl UpdateEventRequest {
    /// Validate against the stored window so partial updates cannot invert it
    pub fn validate(&self, current: &Event) -> Result<(), AppError> {
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err(AppError::validation("Event title must not be empty"));
        }
        validate_window(
            self.start_time.unwrap_or(current.start_time),
            self.end_time.unwrap_or(current.end_time),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventRating {
    pub event_id: i32,
    pub rating_value_id: i32,
}

/// Event rating with its event and rating value preloaded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventRatingListing {
    pub event_rating: EventRating,
    /// `None` once the event is soft-deleted
    pub event: Option<Event>,
    pub rating_value: Option<RatingValue>,
}

/// Replace the rating value of an existing event rating
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateEventRatingRequest {
    pub rating_value_id: i32,
}

/// Request body for on-demand synthesis
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SynthesizeRequest {
    /// Channels to fill; empty means every channel
    #[serde(default)]
    pub channel_ids: Vec<i32>,
    pub day_start: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SynthesizeResponse {
    pub inserted: usize,
}

/// Parse an events-since path parameter, interpreted as UTC
pub fn parse_event_time(raw: &str) -> Result<DateTime<Utc>, AppError> {
    NaiveDateTime::parse_from_str(raw, EVENT_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            AppError::validation(format!(
                "Invalid time '{}', expected {}: {}",
                raw, EVENT_TIME_FORMAT, e
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_event() -> Event {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 6, 0, 0).unwrap();
        Event {
            id: 1,
            channel_id: 1,
            start_time: start,
            end_time: start + chrono::Duration::minutes(15),
            title: "Morning News".to_string(),
            short_description: None,
            extended_description: None,
            genre_id: 1,
            category_id: 1,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_parse_event_time() {
        let parsed = parse_event_time("2025-01-01 06:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 1, 6, 30, 0).unwrap());
        assert!(parse_event_time("2025-01-01T06:30:00Z").is_err());
    }

    #[test]
    fn test_update_cannot_invert_window() {
        let event = sample_event();
        let request = UpdateEventRequest {
            end_time: Some(event.start_time - chrono::Duration::minutes(1)),
            ..Default::default()
        };
        assert!(request.validate(&event).is_err());

        let request = UpdateEventRequest {
            title: Some("Late News".to_string()),
            ..Default::default()
        };
        assert!(request.validate(&event).is_ok());
    }
}
