//! SeaORM-based rating system and rating value repository
//!
//! Rating systems preload their values; rating values preload their system.

use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, QueryOrder};
use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::{
    prelude::{RatingSystems, RatingValues},
    rating_systems, rating_values,
};
use crate::errors::RepositoryResult;
use crate::models::{RatingSystem, RatingValue, RatingValueListing};

#[derive(Clone)]
pub struct RatingSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl RatingSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Every rating system with its values preloaded
    pub async fn find_all_systems(&self) -> RepositoryResult<Vec<RatingSystem>> {
        let rows = RatingSystems::find()
            .find_with_related(RatingValues)
            .order_by_asc(rating_systems::Column::Id)
            .order_by_asc(rating_values::Column::Id)
            .all(&*self.connection)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(system, values)| system_to_domain(system, values))
            .collect())
    }

    pub async fn find_system_by_id(&self, id: i32) -> RepositoryResult<Option<RatingSystem>> {
        let Some(system) = RatingSystems::find_by_id(id).one(&*self.connection).await? else {
            return Ok(None);
        };

        let values = system
            .find_related(RatingValues)
            .order_by_asc(rating_values::Column::Id)
            .all(&*self.connection)
            .await?;

        Ok(Some(system_to_domain(system, values)))
    }

    pub async fn find_all_values(&self) -> RepositoryResult<Vec<RatingValueListing>> {
        let models = RatingValues::find()
            .order_by_asc(rating_values::Column::Id)
            .all(&*self.connection)
            .await?;

        let systems: HashMap<i32, RatingSystem> = self
            .find_all_systems()
            .await?
            .into_iter()
            .map(|system| (system.id, system))
            .collect();

        Ok(models
            .into_iter()
            .map(|model| RatingValueListing {
                rating_system: systems.get(&model.rating_system_id).cloned(),
                rating_value: value_to_domain(model),
            })
            .collect())
    }

    pub async fn find_value_by_id(&self, id: i32) -> RepositoryResult<Option<RatingValueListing>> {
        let Some(model) = RatingValues::find_by_id(id).one(&*self.connection).await? else {
            return Ok(None);
        };

        Ok(Some(RatingValueListing {
            rating_system: self.find_system_by_id(model.rating_system_id).await?,
            rating_value: value_to_domain(model),
        }))
    }
}

fn system_to_domain(
    system: rating_systems::Model,
    values: Vec<rating_values::Model>,
) -> RatingSystem {
    RatingSystem {
        id: system.id,
        country_id: system.country_id,
        description: system.description,
        rating_values: values.into_iter().map(value_to_domain).collect(),
    }
}

pub(crate) fn value_to_domain(model: rating_values::Model) -> RatingValue {
    RatingValue {
        id: model.id,
        rating_system_id: model.rating_system_id,
        value: model.value,
        min_age: model.min_age,
        description: model.description,
    }
}
