//! Reference data models
//!
//! Countries, timezones, genres, categories and rating systems are seeded
//! from fixtures and read-only afterwards, except countries which also accept
//! runtime edits.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Event;
use crate::errors::AppError;

/// Display color used when a genre has no usable color mapping
pub const DEFAULT_GENRE_COLOR: &str = "#A0A0A0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Country {
    pub id: i32,
    #[schema(example = "GB")]
    pub code: String,
    #[schema(example = "United Kingdom")]
    pub name: String,
    #[schema(example = "Europe")]
    pub region: String,
    /// Ordered by timezone name
    pub timezones: Vec<Timezone>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCountryRequest {
    pub code: String,
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCountryRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub region: Option<String>,
}

/// Country codes are two ASCII letters
pub fn validate_country_code(code: &str) -> Result<(), AppError> {
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Country code must be two letters, got '{}'",
            code
        )))
    }
}

impl CreateCountryRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_country_code(&self.code)?;
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Country name must not be empty"));
        }
        Ok(())
    }
}

impl UpdateCountryRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(code) = &self.code {
            validate_country_code(code)?;
        }
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::validation("Country name must not be empty"));
        }
        Ok(())
    }
}

/// Timezone with daylight-saving window
///
/// Offsets are minutes from UTC. A timezone without DST carries zeroed
/// start/end fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Timezone {
    pub id: i32,
    pub country_code: String,
    #[schema(example = "Europe/London")]
    pub timezone_name: String,
    pub standard_offset: i32,
    pub dst_offset: i32,
    pub dst_start_day: i32,
    pub dst_start_month: i32,
    pub dst_start_time: NaiveTime,
    pub dst_end_day: i32,
    pub dst_end_month: i32,
    pub dst_end_time: NaiveTime,
    pub is_default: bool,
}

impl Timezone {
    pub fn observes_dst(&self) -> bool {
        self.dst_start_month != 0 && self.dst_end_month != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub nibble_level_1: i32,
    pub nibble_level_2: i32,
    pub description: String,
    /// Resolved from the genre color table, never stored on the genre
    #[schema(example = "#A0A0A0")]
    pub color_hex: String,
}

/// Resolve a genre's display color from its nibble-level-1 mapping
pub fn resolve_genre_color(mapped: Option<&str>) -> String {
    match mapped {
        Some(color) if !color.is_empty() => color.to_string(),
        _ => DEFAULT_GENRE_COLOR.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub description: String,
    /// Active events in this category, ordered by start time
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RatingValue {
    pub id: i32,
    pub rating_system_id: i32,
    #[schema(example = "12")]
    pub value: String,
    pub min_age: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RatingSystem {
    pub id: i32,
    pub country_id: i32,
    pub description: String,
    /// Ordered by rating value id
    pub rating_values: Vec<RatingValue>,
}

/// Rating value with its rating system preloaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RatingValueListing {
    pub rating_value: RatingValue,
    pub rating_system: Option<RatingSystem>,
}
