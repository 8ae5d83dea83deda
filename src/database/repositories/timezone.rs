//! SeaORM-based timezone repository

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use crate::entities::{prelude::Timezones, timezones};
use crate::errors::RepositoryResult;
use crate::models::Timezone;

#[derive(Clone)]
pub struct TimezoneSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl TimezoneSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<Timezone>> {
        let models = Timezones::find()
            .order_by_asc(timezones::Column::CountryCode)
            .order_by_asc(timezones::Column::TimezoneName)
            .all(&*self.connection)
            .await?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Timezone>> {
        let model = Timezones::find_by_id(id).one(&*self.connection).await?;
        Ok(model.map(model_to_domain))
    }

    /// Timezones are addressed by (country code, name) rather than by id
    pub async fn find_by_country_and_name(
        &self,
        country_code: &str,
        timezone_name: &str,
    ) -> RepositoryResult<Option<Timezone>> {
        let model = Timezones::find()
            .filter(timezones::Column::CountryCode.eq(country_code))
            .filter(timezones::Column::TimezoneName.eq(timezone_name))
            .one(&*self.connection)
            .await?;

        Ok(model.map(model_to_domain))
    }
}

pub(crate) fn model_to_domain(model: timezones::Model) -> Timezone {
    Timezone {
        id: model.id,
        country_code: model.country_code,
        timezone_name: model.timezone_name,
        standard_offset: model.standard_offset,
        dst_offset: model.dst_offset,
        dst_start_day: model.dst_start_day,
        dst_start_month: model.dst_start_month,
        dst_start_time: model.dst_start_time,
        dst_end_day: model.dst_end_day,
        dst_end_month: model.dst_end_month,
        dst_end_time: model.dst_end_time,
        is_default: model.is_default,
    }
}
