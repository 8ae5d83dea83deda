//! SeaORM-based event rating repository
//!
//! Event ratings are keyed by (event id, rating value id). Changing the
//! rating value of a link replaces the row. Reads preload the active event
//! and the rating value of each link.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::event::active_events_by;
use super::rating::value_to_domain;
use crate::entities::{
    event_ratings, events,
    prelude::{EventRatings, RatingValues},
    rating_values,
};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{EventRating, EventRatingListing};

#[derive(Clone)]
pub struct EventRatingSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl EventRatingSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<EventRatingListing>> {
        let rows = EventRatings::find()
            .find_also_related(RatingValues)
            .order_by_asc(event_ratings::Column::EventId)
            .order_by_asc(event_ratings::Column::RatingValueId)
            .all(&*self.connection)
            .await?;

        self.listings(rows).await
    }

    pub async fn find(
        &self,
        event_id: i32,
        rating_value_id: i32,
    ) -> RepositoryResult<Option<EventRatingListing>> {
        let row = EventRatings::find()
            .filter(event_ratings::Column::EventId.eq(event_id))
            .filter(event_ratings::Column::RatingValueId.eq(rating_value_id))
            .find_also_related(RatingValues)
            .one(&*self.connection)
            .await?;

        Ok(self.listings(row.into_iter().collect()).await?.pop())
    }

    async fn listings(
        &self,
        rows: Vec<(event_ratings::Model, Option<rating_values::Model>)>,
    ) -> RepositoryResult<Vec<EventRatingListing>> {
        let event_ids: Vec<i32> = rows.iter().map(|(link, _)| link.event_id).collect();
        let events: HashMap<i32, _> =
            active_events_by(&self.connection, events::Column::Id, &event_ids, |e| e.id)
                .await?
                .into_iter()
                .filter_map(|(id, mut found)| found.pop().map(|event| (id, event)))
                .collect();

        Ok(rows
            .into_iter()
            .map(|(link, value)| EventRatingListing {
                event: events.get(&link.event_id).cloned(),
                rating_value: value.map(value_to_domain),
                event_rating: model_to_domain(link),
            })
            .collect())
    }

    pub async fn create(&self, rating: EventRating) -> RepositoryResult<EventRating> {
        let model = event_ratings::ActiveModel {
            event_id: Set(rating.event_id),
            rating_value_id: Set(rating.rating_value_id),
        }
        .insert(&*self.connection)
        .await?;

        Ok(model_to_domain(model))
    }

    /// Point an existing link at a different rating value
    pub async fn update(
        &self,
        event_id: i32,
        rating_value_id: i32,
        new_rating_value_id: i32,
    ) -> RepositoryResult<EventRating> {
        let txn = self.connection.begin().await?;

        let result = EventRatings::delete_by_id((event_id, rating_value_id))
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found(event_id, rating_value_id));
        }

        let model = event_ratings::ActiveModel {
            event_id: Set(event_id),
            rating_value_id: Set(new_rating_value_id),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model_to_domain(model))
    }

    pub async fn delete(&self, event_id: i32, rating_value_id: i32) -> RepositoryResult<()> {
        let result = EventRatings::delete_by_id((event_id, rating_value_id))
            .exec(&*self.connection)
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found(event_id, rating_value_id));
        }
        Ok(())
    }
}

fn not_found(event_id: i32, rating_value_id: i32) -> RepositoryError {
    RepositoryError::record_not_found(
        "event_ratings",
        "event_id/rating_value_id",
        format!("{}/{}", event_id, rating_value_id),
    )
}

fn model_to_domain(model: event_ratings::Model) -> EventRating {
    EventRating {
        event_id: model.event_id,
        rating_value_id: model.rating_value_id,
    }
}
