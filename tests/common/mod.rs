//! Shared helpers for integration tests
#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use epg_service::{config::Config, database::Database, seed};
use tempfile::TempDir;

/// Bundled fixture directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Default configuration pointed at a store file inside `dir`
pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.database.path = dir.path().join("store").join("epg.db");
    config.seed.fixtures_dir = fixtures_dir();
    config
}

/// Midnight UTC on the day the synthesis tests fill
pub fn test_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// A fresh, fully seeded store; keep the `TempDir` alive for the test
pub async fn seeded_store() -> (TempDir, Config, Database) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(&dir);
    let database = seed::bootstrap(&config)
        .await
        .expect("Failed to bootstrap test store");
    (dir, config, database)
}

/// Copy one bundled fixture into `dir`, replacing its contents
pub fn write_fixture(dir: &std::path::Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("Failed to write fixture");
}

/// Copy all bundled fixtures into `dir`
pub fn copy_fixtures(dir: &std::path::Path) {
    std::fs::create_dir_all(dir).expect("Failed to create fixture dir");
    for entry in std::fs::read_dir(fixtures_dir()).expect("Failed to read fixtures") {
        let entry = entry.expect("Failed to read fixture entry");
        std::fs::copy(entry.path(), dir.join(entry.file_name())).expect("Failed to copy fixture");
    }
}
