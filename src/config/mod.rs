use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

pub mod defaults;

use defaults::*;

/// Service configuration
///
/// Built once at startup and passed by reference into provisioning, seeding
/// and the web layer. Nothing reads it from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Networks created on first bootstrap
    #[serde(default)]
    pub network: Vec<NetworkConfig>,
    /// Channels created on first bootstrap
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store kind selector; only "sqlite3" is supported
    #[serde(default = "default_database_kind")]
    pub kind: String,
    /// Location of the store file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Directory holding the CSV fixtures
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: PathBuf,
}

/// Startup event synthesis from the daily template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Channels to fill; empty means every channel in the store
    #[serde(default)]
    pub channel_ids: Vec<i32>,
    /// Day start for the template; defaults to today 00:00 UTC
    pub day_start: Option<DateTime<Utc>>,
}

/// A network entry, resolved against countries and timezones at seed time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub service_id: i32,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub finish_time: DateTime<Utc>,
    pub country_code: String,
    pub timezone_name: String,
    #[serde(default)]
    pub crid_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub description: String,
    pub broadcast_start_time: DateTime<Utc>,
    pub broadcast_finish_time: DateTime<Utc>,
    pub service_id: i32,
    pub service_vpid: i32,
    pub service_apid: i32,
    pub authority_meta: Option<String>,
    pub logo_name: Option<String>,
    pub network_id: i32,
}

fn default_database_kind() -> String { DEFAULT_DATABASE_KIND.to_string() }
fn default_database_path() -> PathBuf { PathBuf::from(DEFAULT_DATABASE_PATH) }
fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_fixtures_dir() -> PathBuf { PathBuf::from(DEFAULT_FIXTURES_DIR) }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            kind: default_database_kind(),
            path: default_database_path(),
            max_connections: Some(DEFAULT_MAX_CONNECTIONS),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: default_fixtures_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // Sample topology matching the bundled fixtures
        let valid_from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
        let valid_until = Utc.with_ymd_and_hms(2034, 1, 1, 0, 0, 0).single().unwrap_or_default();

        Self {
            database: DatabaseConfig::default(),
            web: WebConfig::default(),
            seed: SeedConfig::default(),
            synthesis: SynthesisConfig::default(),
            network: vec![NetworkConfig {
                service_id: 4164,
                description: "Freeview London".to_string(),
                start_time: valid_from,
                finish_time: valid_until,
                country_code: "GB".to_string(),
                timezone_name: "Europe/London".to_string(),
                crid_description: "crid://freeview.example".to_string(),
            }],
            channels: vec![
                ChannelConfig {
                    description: "EPG One".to_string(),
                    broadcast_start_time: valid_from,
                    broadcast_finish_time: valid_until,
                    service_id: 4165,
                    service_vpid: 101,
                    service_apid: 102,
                    authority_meta: Some("crid://freeview.example/epg-one".to_string()),
                    logo_name: Some("epg-one.png".to_string()),
                    network_id: 1,
                },
                ChannelConfig {
                    description: "EPG Two".to_string(),
                    broadcast_start_time: valid_from,
                    broadcast_finish_time: valid_until,
                    service_id: 4166,
                    service_vpid: 201,
                    service_apid: 202,
                    authority_meta: None,
                    logo_name: None,
                    network_id: 1,
                },
            ],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    /// Load configuration from a TOML file, layering `EPG_` environment overrides on top
    ///
    /// A missing file is created from the defaults first.
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if !std::path::Path::new(config_file).exists() {
            let contents = toml::to_string_pretty(&Self::default())?;
            std::fs::write(config_file, contents)
                .with_context(|| format!("Failed to write default config file: {}", config_file))?;
            info!("Created default config file: {}", config_file);
        }

        Figment::new()
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", config_file))
    }

    /// Day start for startup synthesis
    pub fn synthesis_day_start(&self) -> DateTime<Utc> {
        self.synthesis.day_start.unwrap_or_else(|| {
            let midnight = Utc::now().date_naive().and_hms_opt(0, 0, 0).unwrap_or_default();
            Utc.from_utc_datetime(&midnight)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();

        let config = Config::load_from_file(path).unwrap();

        assert!(std::path::Path::new(path).exists());
        assert_eq!(config.database.kind, "sqlite3");
        assert_eq!(config.network.len(), 1);
        assert_eq!(config.network[0].timezone_name, "Europe/London");
        assert_eq!(config.channels.len(), 2);
        assert!(!config.synthesis.enabled);
    }

    #[test]
    #[serial]
    fn test_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[web]
port = 9191

[[network]]
service_id = 1
description = "Test"
start_time = "2024-01-01T00:00:00Z"
finish_time = "2025-01-01T00:00:00Z"
country_code = "US"
timezone_name = "Eastern"
"#,
        )
        .unwrap();

        let config = Config::load_from_file(path.to_str().unwrap()).unwrap();

        assert_eq!(config.web.port, 9191);
        assert_eq!(config.web.host, DEFAULT_HOST);
        assert_eq!(config.database.path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.network[0].crid_description, "");
        assert!(config.channels.is_empty());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[web]\nport = 9191\n").unwrap();

        unsafe { std::env::set_var("EPG_WEB__PORT", "7070") };
        let config = Config::load_from_file(path.to_str().unwrap());
        unsafe { std::env::remove_var("EPG_WEB__PORT") };

        assert_eq!(config.unwrap().web.port, 7070);
    }

    #[test]
    fn test_explicit_day_start_is_used() {
        let mut config = Config::default();
        let day = Utc.with_ymd_and_hms(2025, 3, 30, 0, 0, 0).unwrap();
        config.synthesis.day_start = Some(day);
        assert_eq!(config.synthesis_day_start(), day);
    }
}
