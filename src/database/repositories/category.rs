use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use std::sync::Arc;

use super::event::active_events_by;
use crate::entities::{categories, events, prelude::Categories};
use crate::errors::RepositoryResult;
use crate::models::{Category, Event};

#[derive(Clone)]
pub struct CategorySeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl CategorySeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Categories with their active events
    pub async fn find_all(&self) -> RepositoryResult<Vec<Category>> {
        let models = Categories::find()
            .order_by_asc(categories::Column::Id)
            .all(&*self.connection)
            .await?;

        self.with_events(models).await
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Category>> {
        let model = Categories::find_by_id(id).one(&*self.connection).await?;
        Ok(self.with_events(model.into_iter().collect()).await?.pop())
    }

    async fn with_events(&self, models: Vec<categories::Model>) -> RepositoryResult<Vec<Category>> {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut events =
            active_events_by(&self.connection, events::Column::CategoryId, &ids, |e| e.category_id)
                .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let category_events = events.remove(&m.id).unwrap_or_default();
                model_to_domain(m, category_events)
            })
            .collect())
    }
}

pub(crate) fn model_to_domain(model: categories::Model, events: Vec<Event>) -> Category {
    Category {
        id: model.id,
        description: model.description,
        events,
    }
}
