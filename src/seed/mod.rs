//! Bootstrap pipeline: store provisioning, fixture seeding and event synthesis
//!
//! `bootstrap` is called explicitly from `main` before the HTTP listener
//! binds. Reference data is only seeded into a store that was created by the
//! same call; an existing store is served as-is.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::database::{Database, StoreStatus};

pub mod fixtures;
pub mod loader;
pub mod orchestrator;
pub mod synthesizer;

pub use orchestrator::{SeedSummary, populate};
pub use synthesizer::synthesize;

/// Provision the store and seed it when it is new
pub async fn bootstrap(config: &Config) -> Result<Database> {
    let (database, status) = Database::ensure_store(&config.database).await?;

    match status {
        StoreStatus::Created => {
            populate(&database, config)
                .await
                .context("Failed to populate new store")?;
        }
        StoreStatus::Opened => {
            info!("Store already provisioned, skipping seed");
        }
    }

    Ok(database)
}

/// Run the configured startup synthesis, if enabled
pub async fn synthesize_on_startup(database: &Database, config: &Config) -> Result<Option<usize>> {
    if !config.synthesis.enabled {
        return Ok(None);
    }

    let inserted = synthesize(
        database,
        &config.seed.fixtures_dir,
        &config.synthesis.channel_ids,
        config.synthesis_day_start(),
    )
    .await
    .context("Startup event synthesis failed")?;

    Ok(Some(inserted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn test_config(dir: &tempfile::TempDir) -> Config {
        let mut config = Config::default();
        config.database.path = dir.path().join("epg.db");
        config.seed.fixtures_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        config
    }

    #[tokio::test]
    #[traced_test]
    async fn test_existing_store_is_not_reseeded() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);

        bootstrap(&config).await.unwrap();
        assert!(logs_contain("Store population completed"));

        bootstrap(&config).await.unwrap();
        assert!(logs_contain("Store already provisioned, skipping seed"));
    }

    #[tokio::test]
    async fn test_synthesis_disabled_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let database = bootstrap(&config).await.unwrap();

        assert_eq!(synthesize_on_startup(&database, &config).await.unwrap(), None);
    }
}
