/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Database defaults
pub const DEFAULT_DATABASE_KIND: &str = "sqlite3";
pub const DEFAULT_DATABASE_PATH: &str = "./bin/epg.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// Seeding defaults
pub const DEFAULT_FIXTURES_DIR: &str = "./fixtures";

// Environment overrides, e.g. EPG_WEB__PORT=9090
pub const ENV_PREFIX: &str = "EPG_";
pub const ENV_SEPARATOR: &str = "__";
