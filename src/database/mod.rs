//! SeaORM-based store provisioning
//!
//! This module owns the lifecycle of the SQLite store file:
//! - `ensure_store` creates the file and materializes the schema on first run
//! - an existing file is opened as-is, without touching migrations
//!
//! Foreign-key enforcement relies on sqlx enabling `PRAGMA foreign_keys` on
//! every pooled connection. The schema's cascade and restrict rules depend on it.

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaOrmDatabase, DatabaseConnection};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{DatabaseConfig, defaults::DEFAULT_MAX_CONNECTIONS};
use crate::errors::AppError;

pub mod migrations;
pub mod repositories;

/// Handle to a provisioned store
#[derive(Debug, Clone)]
pub struct Database {
    /// Pooled connection shared by repositories and handlers
    pub connection: Arc<DatabaseConnection>,
    /// Location of the store file
    pub path: PathBuf,
    /// Database type for backend-specific behavior
    pub database_type: DatabaseType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    SQLite,
}

/// Outcome of `Database::ensure_store`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// The file did not exist; it was created and migrated
    Created,
    /// The file already existed and was opened without migrations
    Opened,
}

impl Database {
    /// Open the store described by `config`, creating it first if needed
    ///
    /// Creation runs the full migration set exactly once. Any failure here is
    /// unrecoverable for the process: a half-created file must be removed by
    /// an operator before the next start.
    pub async fn ensure_store(config: &DatabaseConfig) -> Result<(Self, StoreStatus)> {
        let database_type = DatabaseType::from_kind(&config.kind)?;
        let path = config.path.as_path();

        if path.exists() {
            info!("Opening existing {} store: {}", database_type, path.display());
            let database = Self::connect(config, database_type).await?;
            return Ok((database, StoreStatus::Opened));
        }

        info!("Store file does not exist, creating: {}", path.display());
        Self::create_store_file(path)?;

        let database = Self::connect(config, database_type).await?;
        database.migrate().await?;

        Ok((database, StoreStatus::Created))
    }

    /// Create an empty store file along with any missing parent directories
    fn create_store_file(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory for store: {}", parent.display())
                })?;
                info!("Created directory for store: {}", parent.display());
            }
        }

        // Handle is closed as soon as it goes out of scope
        std::fs::File::create(path)
            .with_context(|| format!("Failed to create store file: {}", path.display()))?;

        Ok(())
    }

    async fn connect(config: &DatabaseConfig, database_type: DatabaseType) -> Result<Self> {
        let url = Self::sqlite_url(&config.path);

        let mut connect_options = ConnectOptions::new(&url);
        connect_options
            .max_connections(config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(3))
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        let connection = match SeaOrmDatabase::connect(connect_options).await {
            Ok(conn) => conn,
            Err(e) => {
                // Log the full error chain for debugging
                tracing::error!("Database connection failed: {:?}", e);
                let mut source = e.source();
                let mut level = 0;
                while let Some(err) = source {
                    tracing::error!("  Level {}: {}", level, err);
                    source = err.source();
                    level += 1;
                }
                return Err(anyhow::anyhow!(
                    "Failed to connect to store at '{}': {}",
                    config.path.display(),
                    e
                ));
            }
        };

        debug!("Database connection established: {}", url);

        Ok(Self {
            connection: Arc::new(connection),
            path: config.path.clone(),
            database_type,
        })
    }

    /// The file must already exist; creation is done explicitly beforehand
    fn sqlite_url(path: &Path) -> String {
        format!("sqlite://{}?mode=rw", path.display())
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        use migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        info!("Running database migrations for {}", self.database_type);

        Migrator::up(&*self.connection, None)
            .await
            .context("Failed to run migrations")?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the shared database connection
    pub fn connection(&self) -> Arc<DatabaseConnection> {
        self.connection.clone()
    }

    /// Check that the store answers a trivial query
    pub async fn ping(&self) -> Result<()> {
        self.connection
            .execute_unprepared("SELECT 1")
            .await
            .context("Store did not answer ping")?;
        Ok(())
    }
}

impl DatabaseType {
    /// Map a configured store kind to a supported backend
    pub fn from_kind(kind: &str) -> Result<Self> {
        match kind {
            "sqlite3" => Ok(Self::SQLite),
            other => Err(AppError::configuration(format!("Unsupported database type: {}", other)).into()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::SQLite => "SQLite",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
