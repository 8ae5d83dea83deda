//! SeaORM-based network repository
//!
//! Networks are returned with their country and timezone resolved. A
//! network whose timezone row is gone is still listed, labelled
//! `UNKNOWN_TIMEZONE` with zero offsets.

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::{
    countries, networks,
    prelude::{Countries, Networks, Timezones},
    timezones,
};
use crate::errors::RepositoryResult;
use crate::models::{Network, UNKNOWN_TIMEZONE};

#[derive(Clone)]
pub struct NetworkSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl NetworkSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<Network>> {
        let models = Networks::find()
            .order_by_asc(networks::Column::Id)
            .all(&*self.connection)
            .await?;

        let countries: HashMap<i32, countries::Model> = Countries::find()
            .all(&*self.connection)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let timezones: HashMap<i32, timezones::Model> = Timezones::find()
            .all(&*self.connection)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let country = countries.get(&m.country_id);
                let timezone = timezones.get(&m.timezone_id);
                model_to_domain(m, country, timezone)
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Network>> {
        let Some(model) = Networks::find_by_id(id).one(&*self.connection).await? else {
            return Ok(None);
        };

        let country = Countries::find_by_id(model.country_id)
            .one(&*self.connection)
            .await?;
        let timezone = Timezones::find_by_id(model.timezone_id)
            .one(&*self.connection)
            .await?;

        Ok(Some(model_to_domain(model, country.as_ref(), timezone.as_ref())))
    }
}

fn model_to_domain(
    model: networks::Model,
    country: Option<&countries::Model>,
    timezone: Option<&timezones::Model>,
) -> Network {
    let (timezone_name, standard_offset, dst_offset) = match timezone {
        Some(tz) => (tz.timezone_name.clone(), tz.standard_offset, tz.dst_offset),
        None => (UNKNOWN_TIMEZONE.to_string(), 0, 0),
    };

    Network {
        id: model.id,
        service_id: model.service_id,
        description: model.description,
        start_time: model.start_time,
        finish_time: model.finish_time,
        crid_description: model.crid_description,
        country_id: model.country_id,
        country_code: country.map(|c| c.code.clone()).unwrap_or_default(),
        country_name: country.map(|c| c.name.clone()).unwrap_or_default(),
        timezone_id: model.timezone_id,
        timezone_name,
        standard_offset,
        dst_offset,
    }
}
