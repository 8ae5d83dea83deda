//! SeaORM migrations for the EPG store
//!
//! Migrations run exactly once, when the schema provisioner creates a fresh
//! store file. An existing store is opened as-is.

use sea_orm_migration::prelude::*;

pub mod m20250901_000001_initial_schema;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250901_000001_initial_schema::Migration)]
    }
}
