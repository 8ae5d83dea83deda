//! Network and channel models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Event;

/// Label shown when a network's timezone cannot be resolved
pub const UNKNOWN_TIMEZONE: &str = "Unknown";

/// Broadcast network with its country and timezone resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Network {
    pub id: i32,
    pub service_id: i32,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub finish_time: DateTime<Utc>,
    #[schema(example = "crid://freeview.example")]
    pub crid_description: String,
    pub country_id: i32,
    pub country_code: String,
    pub country_name: String,
    pub timezone_id: i32,
    #[schema(example = "Europe/London")]
    pub timezone_name: String,
    pub standard_offset: i32,
    pub dst_offset: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Channel {
    pub id: i32,
    pub network_id: i32,
    /// Description of the owning network
    pub network_name: String,
    pub description: String,
    pub broadcast_start_time: DateTime<Utc>,
    pub broadcast_finish_time: DateTime<Utc>,
    pub service_id: i32,
    pub service_vpid: i32,
    pub service_apid: i32,
    pub authority_meta: Option<String>,
    pub logo_name: Option<String>,
    /// Active events on this channel, ordered by start time
    pub events: Vec<Event>,
}
