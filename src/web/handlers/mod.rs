//! HTTP handlers organized by resource

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult, RepositoryResult};

pub mod categories;
pub mod channels;
pub mod countries;
pub mod event_ratings;
pub mod events;
pub mod genres;
pub mod health;
pub mod networks;
pub mod pages;
pub mod ratings;
pub mod static_assets;
pub mod timezones;

/// Payload returned by delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    /// Key of the removed resource
    pub id: String,
}

impl DeletedResponse {
    pub fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }
}

/// Turn a repository lookup into a 404 when nothing matched
pub(crate) fn require<T>(
    found: RepositoryResult<Option<T>>,
    resource: &str,
    id: impl ToString,
) -> AppResult<T> {
    found?.ok_or_else(|| AppError::not_found(resource, id))
}
