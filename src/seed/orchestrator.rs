//! First-run population of a freshly created store

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use super::fixtures::{
    CategoryRecord, CountryRecord, GenreColorRecord, GenreRecord, RatingSystemRecord,
    RatingValueRecord, TimezoneRecord,
};
use super::loader::{find_country, find_timezone, load_default};
use crate::config::{ChannelConfig, Config, NetworkConfig};
use crate::database::Database;
use crate::entities::{channels, networks};
use crate::errors::SeedResult;

/// Rows written per kind by `populate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub countries: usize,
    pub timezones: usize,
    pub genre_colors: usize,
    pub genres: usize,
    pub categories: usize,
    pub rating_values: usize,
    pub rating_systems: usize,
    pub networks: usize,
    pub channels: usize,
}

/// Seed reference data, then networks and channels from configuration
///
/// Steps run strictly in dependency order and the first failure stops the
/// run. Rating values precede rating systems because the values file carries
/// the system ids.
pub async fn populate(database: &Database, config: &Config) -> SeedResult<SeedSummary> {
    let db = &*database.connection;
    let dir = config.seed.fixtures_dir.as_path();

    info!("Populating store from fixtures in {}", dir.display());

    let mut summary = seed_reference_data(db, dir).await?;
    summary.networks = seed_networks(db, &config.network).await?;
    summary.channels = seed_channels(db, &config.channels).await?;

    info!(
        countries = summary.countries,
        timezones = summary.timezones,
        genre_colors = summary.genre_colors,
        genres = summary.genres,
        categories = summary.categories,
        rating_values = summary.rating_values,
        rating_systems = summary.rating_systems,
        networks = summary.networks,
        channels = summary.channels,
        "Store population completed"
    );

    Ok(summary)
}

async fn seed_reference_data(db: &DatabaseConnection, dir: &Path) -> SeedResult<SeedSummary> {
    Ok(SeedSummary {
        countries: load_default::<CountryRecord>(db, dir).await?,
        timezones: load_default::<TimezoneRecord>(db, dir).await?,
        genre_colors: load_default::<GenreColorRecord>(db, dir).await?,
        genres: load_default::<GenreRecord>(db, dir).await?,
        categories: load_default::<CategoryRecord>(db, dir).await?,
        rating_values: load_default::<RatingValueRecord>(db, dir).await?,
        rating_systems: load_default::<RatingSystemRecord>(db, dir).await?,
        ..Default::default()
    })
}

/// Insert configured networks, resolving country and timezone by name
pub async fn seed_networks(db: &DatabaseConnection, entries: &[NetworkConfig]) -> SeedResult<usize> {
    for entry in entries {
        let country = find_country(db, &entry.country_code).await?;
        let timezone = find_timezone(db, &entry.country_code, &entry.timezone_name).await?;

        let network = networks::ActiveModel {
            country_id: Set(country.id),
            timezone_id: Set(timezone.id),
            service_id: Set(entry.service_id),
            description: Set(entry.description.clone()),
            start_time: Set(entry.start_time),
            finish_time: Set(entry.finish_time),
            crid_description: Set(entry.crid_description.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!(
            "Created network {} ({}) in {}/{}",
            network.id, network.description, entry.country_code, entry.timezone_name
        );
    }

    Ok(entries.len())
}

pub async fn seed_channels(db: &DatabaseConnection, entries: &[ChannelConfig]) -> SeedResult<usize> {
    for entry in entries {
        let channel = channels::ActiveModel {
            network_id: Set(entry.network_id),
            description: Set(entry.description.clone()),
            broadcast_start_time: Set(entry.broadcast_start_time),
            broadcast_finish_time: Set(entry.broadcast_finish_time),
            service_id: Set(entry.service_id),
            service_vpid: Set(entry.service_vpid),
            service_apid: Set(entry.service_apid),
            authority_meta: Set(entry.authority_meta.clone()),
            logo_name: Set(entry.logo_name.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("Created channel {} ({})", channel.id, channel.description);
    }

    Ok(entries.len())
}
