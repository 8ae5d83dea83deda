//! SeaORM-based country repository
//!
//! Countries are seeded from fixtures and remain editable at runtime. Reads
//! preload each country's timezones.
//! Deleting a country that still owns timezones, rating systems or networks
//! fails with a constraint violation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use super::traits::Repository;
use super::timezone::model_to_domain as timezone_to_domain;
use crate::entities::{
    countries,
    prelude::{Countries, Timezones},
    timezones,
};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Country, CreateCountryRequest, UpdateCountryRequest};

/// SeaORM-based repository for country operations
#[derive(Clone)]
pub struct CountrySeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl CountrySeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Find a country by its two-letter code
    pub async fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Country>> {
        let model = Countries::find()
            .filter(countries::Column::Code.eq(normalize_code(code)))
            .one(&*self.connection)
            .await?;

        self.with_timezones(model).await
    }

    async fn with_timezones(
        &self,
        model: Option<countries::Model>,
    ) -> RepositoryResult<Option<Country>> {
        let Some(model) = model else {
            return Ok(None);
        };

        let zones = model
            .find_related(Timezones)
            .order_by_asc(timezones::Column::TimezoneName)
            .all(&*self.connection)
            .await?;

        Ok(Some(self.model_to_domain(model, zones)))
    }

    fn model_to_domain(&self, model: countries::Model, zones: Vec<timezones::Model>) -> Country {
        Country {
            id: model.id,
            code: model.code,
            name: model.name,
            region: model.region,
            timezones: zones.into_iter().map(timezone_to_domain).collect(),
        }
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[async_trait]
impl Repository<Country, CreateCountryRequest, UpdateCountryRequest> for CountrySeaOrmRepository {
    async fn create(&self, request: CreateCountryRequest) -> RepositoryResult<Country> {
        let model = countries::ActiveModel {
            code: Set(normalize_code(&request.code)),
            name: Set(request.name.trim().to_string()),
            region: Set(request.region.trim().to_string()),
            ..Default::default()
        }
        .insert(&*self.connection)
        .await?;

        Ok(self.model_to_domain(model, Vec::new()))
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Country>> {
        let model = Countries::find_by_id(id).one(&*self.connection).await?;
        self.with_timezones(model).await
    }

    async fn update(&self, id: i32, request: UpdateCountryRequest) -> RepositoryResult<Country> {
        let existing = Countries::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("countries", "id", id))?;

        let mut active_model: countries::ActiveModel = existing.into();
        if let Some(code) = request.code {
            active_model.code = Set(normalize_code(&code));
        }
        if let Some(name) = request.name {
            active_model.name = Set(name.trim().to_string());
        }
        if let Some(region) = request.region {
            active_model.region = Set(region.trim().to_string());
        }

        let model = active_model.update(&*self.connection).await?;
        self.with_timezones(Some(model))
            .await?
            .ok_or_else(|| RepositoryError::record_not_found("countries", "id", id))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let result = Countries::delete_by_id(id).exec(&*self.connection).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::record_not_found("countries", "id", id));
        }
        Ok(())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Country>> {
        let rows = Countries::find()
            .find_with_related(Timezones)
            .order_by_asc(countries::Column::Name)
            .order_by_asc(countries::Column::Id)
            .order_by_asc(timezones::Column::TimezoneName)
            .all(&*self.connection)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(country, zones)| self.model_to_domain(country, zones))
            .collect())
    }
}
