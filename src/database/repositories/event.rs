//! SeaORM-based event repository
//!
//! Every read here sees active events only (`deleted_at IS NULL`). Deleting
//! an event stamps `deleted_at` and keeps the row. The synthesizer may fill
//! its (channel, start time) slot again.
//!
//! Listings preload the channel, category, genre and ratings of each event.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::category::model_to_domain as category_to_domain;
use super::channel::model_to_domain as channel_to_domain;
use super::genre::{load_color_map, model_to_domain as genre_to_domain};
use super::rating::value_to_domain;
use super::traits::Repository;
use crate::entities::{
    categories, channels, event_ratings, events, genres,
    prelude::{Categories, Channels, EventRatings, Events, Genres, Networks, RatingValues},
};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{
    Category, Channel, CreateEventRequest, Event, EventListing, RatingValue, UpdateEventRequest,
};

#[derive(Clone)]
pub struct EventSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl EventSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    fn active() -> Select<Events> {
        Events::find().filter(events::Column::DeletedAt.is_null())
    }

    async fn find_active_model(&self, id: i32) -> RepositoryResult<events::Model> {
        Self::active()
            .filter(events::Column::Id.eq(id))
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("events", "id", id))
    }

    /// Active events starting at or after `since`, with relations preloaded
    pub async fn find_since(&self, since: DateTime<Utc>) -> RepositoryResult<Vec<EventListing>> {
        let rows = Self::active()
            .filter(events::Column::StartTime.gte(since))
            .find_also_related(Genres)
            .order_by_asc(events::Column::StartTime)
            .order_by_asc(events::Column::ChannelId)
            .all(&*self.connection)
            .await?;

        debug!("Found {} events since {}", rows.len(), since);
        self.listings(rows).await
    }

    /// Every active event with relations preloaded
    pub async fn list_listings(&self) -> RepositoryResult<Vec<EventListing>> {
        let rows = Self::active()
            .find_also_related(Genres)
            .order_by_asc(events::Column::StartTime)
            .order_by_asc(events::Column::ChannelId)
            .all(&*self.connection)
            .await?;

        self.listings(rows).await
    }

    pub async fn find_listing(&self, id: i32) -> RepositoryResult<Option<EventListing>> {
        let Some(row) = Self::active()
            .filter(events::Column::Id.eq(id))
            .find_also_related(Genres)
            .one(&*self.connection)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.listings(vec![row]).await?.pop())
    }

    async fn listings(
        &self,
        rows: Vec<(events::Model, Option<genres::Model>)>,
    ) -> RepositoryResult<Vec<EventListing>> {
        let colors = load_color_map(&self.connection).await?;
        let event_ids: Vec<i32> = rows.iter().map(|(event, _)| event.id).collect();
        let mut ratings = self.ratings_for(&event_ids).await?;
        let channels = self
            .channels_for(rows.iter().map(|(event, _)| event.channel_id))
            .await?;
        let categories = self
            .categories_for(rows.iter().map(|(event, _)| event.category_id))
            .await?;

        Ok(rows
            .into_iter()
            .map(|(event, genre)| EventListing {
                ratings: ratings.remove(&event.id).unwrap_or_default(),
                channel: channels.get(&event.channel_id).cloned(),
                category: categories.get(&event.category_id).cloned(),
                genre: genre.map(|g| genre_to_domain(g, &colors)),
                event: model_to_domain(event),
            })
            .collect())
    }

    /// Rating values grouped by event id
    async fn ratings_for(
        &self,
        event_ids: &[i32],
    ) -> RepositoryResult<HashMap<i32, Vec<RatingValue>>> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = EventRatings::find()
            .filter(event_ratings::Column::EventId.is_in(event_ids.iter().copied()))
            .find_also_related(RatingValues)
            .order_by_asc(event_ratings::Column::RatingValueId)
            .all(&*self.connection)
            .await?;

        let mut grouped: HashMap<i32, Vec<RatingValue>> = HashMap::new();
        for (link, value) in rows {
            if let Some(value) = value {
                grouped
                    .entry(link.event_id)
                    .or_default()
                    .push(value_to_domain(value));
            }
        }
        Ok(grouped)
    }

    /// Channels by id, without their event lists
    async fn channels_for(
        &self,
        channel_ids: impl Iterator<Item = i32>,
    ) -> RepositoryResult<HashMap<i32, Channel>> {
        let rows = Channels::find()
            .filter(channels::Column::Id.is_in(channel_ids))
            .find_also_related(Networks)
            .all(&*self.connection)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(channel, network)| (channel.id, channel_to_domain(channel, network, Vec::new())))
            .collect())
    }

    /// Categories by id, without their event lists
    async fn categories_for(
        &self,
        category_ids: impl Iterator<Item = i32>,
    ) -> RepositoryResult<HashMap<i32, Category>> {
        let models = Categories::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(&*self.connection)
            .await?;

        Ok(models
            .into_iter()
            .map(|category| (category.id, category_to_domain(category, Vec::new())))
            .collect())
    }
}

/// Active events whose `column` is one of `ids`, grouped by that value
pub(crate) async fn active_events_by(
    db: &DatabaseConnection,
    column: events::Column,
    ids: &[i32],
    key: fn(&events::Model) -> i32,
) -> RepositoryResult<HashMap<i32, Vec<Event>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let models = EventSeaOrmRepository::active()
        .filter(column.is_in(ids.iter().copied()))
        .order_by_asc(events::Column::StartTime)
        .all(db)
        .await?;

    let mut grouped: HashMap<i32, Vec<Event>> = HashMap::new();
    for model in models {
        grouped.entry(key(&model)).or_default().push(model_to_domain(model));
    }
    Ok(grouped)
}

#[async_trait]
impl Repository<Event, CreateEventRequest, UpdateEventRequest> for EventSeaOrmRepository {
    /// Insert the event and its ratings atomically
    async fn create(&self, request: CreateEventRequest) -> RepositoryResult<Event> {
        let now = Utc::now();
        let txn = self.connection.begin().await?;

        let model = events::ActiveModel {
            channel_id: Set(request.channel_id),
            start_time: Set(request.start_time),
            end_time: Set(request.end_time),
            title: Set(request.title.trim().to_string()),
            short_description: Set(request.short_description),
            extended_description: Set(request.extended_description),
            genre_id: Set(request.genre_id),
            category_id: Set(request.category_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for rating_value_id in request.rating_value_ids {
            event_ratings::ActiveModel {
                event_id: Set(model.id),
                rating_value_id: Set(rating_value_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Event>> {
        let model = Self::active()
            .filter(events::Column::Id.eq(id))
            .one(&*self.connection)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, id: i32, request: UpdateEventRequest) -> RepositoryResult<Event> {
        let existing = self.find_active_model(id).await?;

        let mut active_model: events::ActiveModel = existing.into();
        if let Some(channel_id) = request.channel_id {
            active_model.channel_id = Set(channel_id);
        }
        if let Some(start_time) = request.start_time {
            active_model.start_time = Set(start_time);
        }
        if let Some(end_time) = request.end_time {
            active_model.end_time = Set(end_time);
        }
        if let Some(title) = request.title {
            active_model.title = Set(title.trim().to_string());
        }
        if request.short_description.is_some() {
            active_model.short_description = Set(request.short_description);
        }
        if request.extended_description.is_some() {
            active_model.extended_description = Set(request.extended_description);
        }
        if let Some(genre_id) = request.genre_id {
            active_model.genre_id = Set(genre_id);
        }
        if let Some(category_id) = request.category_id {
            active_model.category_id = Set(category_id);
        }
        active_model.updated_at = Set(Utc::now());

        let model = active_model.update(&*self.connection).await?;
        Ok(model_to_domain(model))
    }

    /// Soft delete
    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let existing = self.find_active_model(id).await?;

        let now = Utc::now();
        let mut active_model: events::ActiveModel = existing.into();
        active_model.deleted_at = Set(Some(now));
        active_model.updated_at = Set(now);
        active_model.update(&*self.connection).await?;

        Ok(())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Event>> {
        let models = Self::active()
            .order_by_asc(events::Column::StartTime)
            .order_by_asc(events::Column::ChannelId)
            .all(&*self.connection)
            .await?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

fn model_to_domain(model: events::Model) -> Event {
    Event {
        id: model.id,
        channel_id: model.channel_id,
        start_time: model.start_time,
        end_time: model.end_time,
        title: model.title,
        short_description: model.short_description,
        extended_description: model.extended_description,
        genre_id: model.genre_id,
        category_id: model.category_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
