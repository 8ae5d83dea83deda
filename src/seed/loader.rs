//! Inserting parsed fixture records into the store

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::path::Path;
use tracing::{debug, info};

use super::fixtures::{
    CategoryRecord, CountryRecord, FixtureRecord, GenreColorRecord, GenreRecord,
    RatingSystemRecord, RatingValueRecord, TimezoneRecord, load_csv,
};
use crate::entities::{
    categories, countries, genre_colors, genres, prelude::*, rating_systems, rating_values,
    timezones,
};
use crate::errors::{SeedError, SeedResult};

/// A fixture record that knows how to persist itself
#[async_trait]
pub trait SeedRecord: FixtureRecord + Send + 'static {
    /// Entity name used in logs and lookup errors
    const ENTITY: &'static str;

    async fn insert(self, db: &DatabaseConnection) -> SeedResult<()>;
}

/// Load `filename` from `dir` and insert every record in file order
///
/// The whole file is parsed before the first insert. Inserts are not wrapped
/// in a transaction: rows written before a failing row stay written.
pub async fn load_into<T: SeedRecord>(
    db: &DatabaseConnection,
    dir: &Path,
    filename: &str,
) -> SeedResult<usize> {
    let records = load_csv::<T>(dir, filename)?;
    let total = records.len();

    for record in records {
        record.insert(db).await?;
    }

    info!("Seeded {} {} rows from {}", total, T::ENTITY, filename);
    Ok(total)
}

/// Load a record type from its default fixture file
pub async fn load_default<T: SeedRecord>(db: &DatabaseConnection, dir: &Path) -> SeedResult<usize> {
    load_into::<T>(db, dir, T::FILE).await
}

pub(crate) async fn find_country(
    db: &DatabaseConnection,
    code: &str,
) -> SeedResult<countries::Model> {
    Countries::find()
        .filter(countries::Column::Code.eq(code))
        .one(db)
        .await?
        .ok_or_else(|| SeedError::lookup_failed("country", format!("code {}", code)))
}

pub(crate) async fn find_timezone(
    db: &DatabaseConnection,
    country_code: &str,
    timezone_name: &str,
) -> SeedResult<timezones::Model> {
    Timezones::find()
        .filter(timezones::Column::CountryCode.eq(country_code))
        .filter(timezones::Column::TimezoneName.eq(timezone_name))
        .one(db)
        .await?
        .ok_or_else(|| {
            SeedError::lookup_failed("timezone", format!("{}/{}", country_code, timezone_name))
        })
}

#[async_trait]
impl SeedRecord for CountryRecord {
    const ENTITY: &'static str = "country";

    async fn insert(self, db: &DatabaseConnection) -> SeedResult<()> {
        countries::ActiveModel {
            code: Set(self.code),
            name: Set(self.name),
            region: Set(self.region),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedRecord for TimezoneRecord {
    const ENTITY: &'static str = "timezone";

    async fn insert(self, db: &DatabaseConnection) -> SeedResult<()> {
        let country = find_country(db, &self.country_code).await?;
        debug!(
            "Resolved timezone {} to country {}",
            self.timezone_name, country.id
        );

        timezones::ActiveModel {
            country_code: Set(country.code),
            timezone_name: Set(self.timezone_name),
            standard_offset: Set(self.standard_offset),
            dst_offset: Set(self.dst_offset),
            dst_start_day: Set(self.dst_start.day),
            dst_start_month: Set(self.dst_start.month),
            dst_start_time: Set(self.dst_start.time),
            dst_end_day: Set(self.dst_end.day),
            dst_end_month: Set(self.dst_end.month),
            dst_end_time: Set(self.dst_end.time),
            is_default: Set(self.is_default),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedRecord for GenreColorRecord {
    const ENTITY: &'static str = "genre color";

    async fn insert(self, db: &DatabaseConnection) -> SeedResult<()> {
        genre_colors::ActiveModel {
            nibble_level_1: Set(self.nibble_level_1),
            color_hex: Set(self.color_hex),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedRecord for GenreRecord {
    const ENTITY: &'static str = "genre";

    async fn insert(self, db: &DatabaseConnection) -> SeedResult<()> {
        genres::ActiveModel {
            nibble_level_1: Set(self.nibble_level_1),
            nibble_level_2: Set(self.nibble_level_2),
            description: Set(self.description),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedRecord for CategoryRecord {
    const ENTITY: &'static str = "category";

    async fn insert(self, db: &DatabaseConnection) -> SeedResult<()> {
        categories::ActiveModel {
            id: Set(self.id),
            description: Set(self.description),
        }
        .insert(db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedRecord for RatingValueRecord {
    const ENTITY: &'static str = "rating value";

    async fn insert(self, db: &DatabaseConnection) -> SeedResult<()> {
        rating_values::ActiveModel {
            id: Set(self.id),
            rating_system_id: Set(self.rating_system_id),
            value: Set(self.value),
            min_age: Set(self.min_age),
            description: Set(self.description),
        }
        .insert(db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SeedRecord for RatingSystemRecord {
    const ENTITY: &'static str = "rating system";

    async fn insert(self, db: &DatabaseConnection) -> SeedResult<()> {
        let country = find_country(db, &self.country_code).await?;

        rating_systems::ActiveModel {
            id: Set(self.id),
            country_id: Set(country.id),
            description: Set(self.description),
        }
        .insert(db)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::Database;
    use chrono::NaiveTime;
    use sea_orm::PaginatorTrait;

    async fn fresh_store(dir: &Path) -> Database {
        let config = DatabaseConfig {
            path: dir.join("epg.db"),
            ..DatabaseConfig::default()
        };
        Database::ensure_store(&config).await.unwrap().0
    }

    fn write_fixture(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[tokio::test]
    async fn test_timezone_before_country_fails_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let database = fresh_store(dir.path()).await;
        write_fixture(
            dir.path(),
            "timezones.csv",
            "country_code,timezone_name,std,dst,start,end,default\nGB,Europe/London,0,60,30/3 01:00,26/10 02:00,true\n",
        );

        let err = load_default::<TimezoneRecord>(&database.connection, dir.path())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, SeedError::LookupFailed { ref entity, .. } if entity == "country"));
    }

    #[tokio::test]
    async fn test_countries_then_timezones_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let database = fresh_store(dir.path()).await;
        write_fixture(
            dir.path(),
            "countries.csv",
            "code,name,region\nGB, United Kingdom, Europe\nUS,United States,Americas\n",
        );
        write_fixture(
            dir.path(),
            "timezones.csv",
            "country_code,timezone_name,std,dst,start,end,default\nUS, Eastern, -300, -240, 2/3 02:00, 1/11 02:00, true\n",
        );

        let db = &*database.connection;
        assert_eq!(load_default::<CountryRecord>(db, dir.path()).await.unwrap(), 2);
        assert_eq!(load_default::<TimezoneRecord>(db, dir.path()).await.unwrap(), 1);

        let gb = find_country(db, "GB").await.unwrap();
        assert_eq!(gb.name, "United Kingdom");

        let eastern = find_timezone(db, "US", "Eastern").await.unwrap();
        assert_eq!(eastern.standard_offset, -300);
        assert_eq!(eastern.dst_start_month, 3);
        assert_eq!(eastern.dst_end_time, NaiveTime::from_hms_opt(2, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_malformed_file_inserts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let database = fresh_store(dir.path()).await;
        write_fixture(
            dir.path(),
            "genre.csv",
            "n1,n2,description\n1,0,Movie\nx,1,Broken\n",
        );

        let err = load_default::<GenreRecord>(&database.connection, dir.path())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, SeedError::MalformedField { line: 3, .. }));
        assert_eq!(Genres::find().count(&*database.connection).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_insert_keeps_earlier_rows() {
        let dir = tempfile::tempdir().unwrap();
        let database = fresh_store(dir.path()).await;
        write_fixture(
            dir.path(),
            "countries.csv",
            "code,name,region\nGB,United Kingdom,Europe\nUS,United States,Americas\nGB,Great Britain,Europe\nFR,France,Europe\n",
        );

        let err = load_default::<CountryRecord>(&database.connection, dir.path())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, SeedError::Database(_)));
        let db = &*database.connection;
        assert_eq!(Countries::find().count(db).await.unwrap(), 2);
        assert_eq!(find_country(db, "GB").await.unwrap().name, "United Kingdom");
        assert!(find_country(db, "FR").await.is_err());
    }
}
