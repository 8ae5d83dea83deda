//! Store provisioning, seeding and synthesis against real SQLite files

mod common;

use chrono::{Duration, Utc};
use tokio_test::assert_ok;

use common::{copy_fixtures, seeded_store, test_config, test_day, write_fixture};
use epg_service::{
    config::NetworkConfig,
    database::{
        Database, StoreStatus,
        repositories::{
            ChannelSeaOrmRepository, CountrySeaOrmRepository, EventRatingSeaOrmRepository,
            EventSeaOrmRepository, NetworkSeaOrmRepository, RatingSeaOrmRepository, Repository,
            TimezoneSeaOrmRepository,
        },
    },
    errors::{RepositoryError, SeedError},
    seed::{self, fixtures::TimezoneRecord, loader::load_default, orchestrator::seed_networks},
};

#[tokio::test]
async fn test_first_bootstrap_creates_and_seeds_store() {
    let (_dir, config, database) = seeded_store().await;

    assert!(config.database.path.exists());

    let countries = assert_ok!(CountrySeaOrmRepository::new(database.connection()).list_all().await);
    assert_eq!(countries.len(), 6);

    let timezones = assert_ok!(TimezoneSeaOrmRepository::new(database.connection()).find_all().await);
    assert_eq!(timezones.len(), 8);

    let tokyo = timezones
        .iter()
        .find(|tz| tz.timezone_name == "Asia/Tokyo")
        .expect("Tokyo timezone seeded");
    assert_eq!(tokyo.dst_start_day, 0);
    assert_eq!(tokyo.dst_start_month, 0);
    assert_eq!(tokyo.dst_end_day, 0);

    let networks = assert_ok!(NetworkSeaOrmRepository::new(database.connection()).find_all().await);
    assert_eq!(networks.len(), 1);
    assert_eq!(networks[0].country_code, "GB");
    assert_eq!(networks[0].timezone_name, "Europe/London");
    assert_eq!(networks[0].dst_offset, 60);
}

#[tokio::test]
async fn test_second_bootstrap_opens_without_seeding() {
    let (_dir, config, first) = seeded_store().await;
    drop(first);

    let (database, status) = assert_ok!(Database::ensure_store(&config.database).await);
    assert_eq!(status, StoreStatus::Opened);
    drop(database);

    // Seeding again would trip the unique country codes
    let database = assert_ok!(seed::bootstrap(&config).await);
    let countries = assert_ok!(CountrySeaOrmRepository::new(database.connection()).list_all().await);
    assert_eq!(countries.len(), 6);
}

#[tokio::test]
async fn test_timezones_before_countries_fails_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let (database, status) = assert_ok!(Database::ensure_store(&config.database).await);
    assert_eq!(status, StoreStatus::Created);

    let err = load_default::<TimezoneRecord>(&database.connection, &config.seed.fixtures_dir)
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::LookupFailed { .. }));
}

#[tokio::test]
async fn test_malformed_fixture_aborts_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    let fixtures = dir.path().join("fixtures");
    copy_fixtures(&fixtures);
    write_fixture(
        &fixtures,
        "timezones.csv",
        "country_code,timezone_name,standard_offset,dst_offset,dst_start,dst_end,is_default\n\
         GB,Europe/London,0,60,30-3 01:00,26/10 02:00,true\n",
    );
    config.seed.fixtures_dir = fixtures;

    let err = seed::bootstrap(&config).await.unwrap_err();

    assert!(format!("{:#}", err).contains("Malformed field in timezones.csv line 2"));
}

#[tokio::test]
async fn test_network_timezone_resolution() {
    let (_dir, _config, database) = seeded_store().await;
    let now = Utc::now();
    let entry = |timezone_name: &str| NetworkConfig {
        service_id: 9000,
        description: "Regional Mux".to_string(),
        start_time: now,
        finish_time: now + Duration::days(365),
        country_code: "GB".to_string(),
        timezone_name: timezone_name.to_string(),
        crid_description: String::new(),
    };

    assert_eq!(
        assert_ok!(seed_networks(&database.connection, &[entry("Europe/London")]).await),
        1
    );

    let err = seed_networks(&database.connection, &[entry("Europe/Atlantis")])
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::LookupFailed { .. }));
}

#[tokio::test]
async fn test_synthesis_is_idempotent() {
    let (_dir, config, database) = seeded_store().await;
    let fixtures = &config.seed.fixtures_dir;

    let inserted = assert_ok!(seed::synthesize(&database, fixtures, &[], test_day()).await);
    assert_eq!(inserted, 34);

    let again = assert_ok!(seed::synthesize(&database, fixtures, &[], test_day()).await);
    assert_eq!(again, 0);

    // A different day is a fresh set of slots
    let next_day = test_day() + Duration::days(1);
    let next = assert_ok!(seed::synthesize(&database, fixtures, &[1], next_day).await);
    assert_eq!(next, 17);
}

#[tokio::test]
async fn test_soft_deleted_slot_is_refilled() {
    let (_dir, config, database) = seeded_store().await;
    let fixtures = &config.seed.fixtures_dir;
    let events = EventSeaOrmRepository::new(database.connection());

    assert_ok!(seed::synthesize(&database, fixtures, &[1], test_day()).await);
    let first = assert_ok!(events.list_all().await)[0].clone();
    assert_eq!(first.start_time, test_day() + Duration::hours(6));

    assert_ok!(events.delete(first.id).await);
    assert_eq!(assert_ok!(events.find_by_id(first.id).await), None);

    let refill = assert_ok!(seed::synthesize(&database, fixtures, &[1], test_day()).await);
    assert_eq!(refill, 1);

    let listed = assert_ok!(events.list_all().await);
    assert_eq!(listed.len(), 17);
    let replacement = &listed[0];
    assert_eq!(replacement.start_time, first.start_time);
    assert_eq!(replacement.title, first.title);
    assert_ne!(replacement.id, first.id);

    let again = assert_ok!(seed::synthesize(&database, fixtures, &[1], test_day()).await);
    assert_eq!(again, 0);
}

#[tokio::test]
async fn test_failed_slot_keeps_earlier_slots() {
    let (dir, _config, database) = seeded_store().await;
    let fixtures = dir.path().join("fixtures");
    copy_fixtures(&fixtures);
    write_fixture(
        &fixtures,
        "events_template.csv",
        "title,start_minute,category_id,genre_id,rating_value_id\n\
         Opening Slot,360,3,4,1\n\
         Broken Slot,375,3,9999,1\n\
         Closing Slot,390,3,4,1\n",
    );

    let err = seed::synthesize(&database, &fixtures, &[1], test_day())
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::Database(_)));

    let events = assert_ok!(EventSeaOrmRepository::new(database.connection()).list_all().await);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Opening Slot");

    let ratings = assert_ok!(EventRatingSeaOrmRepository::new(database.connection()).find_all().await);
    assert_eq!(ratings.len(), 1);
}

#[tokio::test]
async fn test_country_with_dependents_is_not_deleted() {
    let (_dir, config, database) = seeded_store().await;
    assert_ok!(seed::synthesize(&database, &config.seed.fixtures_dir, &[], test_day()).await);

    let countries = CountrySeaOrmRepository::new(database.connection());
    let gb = assert_ok!(countries.find_by_code("GB").await).expect("GB seeded");

    let err = countries.delete(gb.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConstraintViolation { .. }));

    assert!(assert_ok!(countries.find_by_id(gb.id).await).is_some());
    let timezones = assert_ok!(TimezoneSeaOrmRepository::new(database.connection()).find_all().await);
    assert_eq!(timezones.len(), 8);
    let networks = assert_ok!(NetworkSeaOrmRepository::new(database.connection()).find_all().await);
    assert_eq!(networks.len(), 1);
    let channels = assert_ok!(ChannelSeaOrmRepository::new(database.connection()).find_all().await);
    assert_eq!(channels.len(), 2);
    let systems = assert_ok!(RatingSeaOrmRepository::new(database.connection()).find_all_systems().await);
    assert_eq!(systems.len(), 2);
    let events = assert_ok!(EventSeaOrmRepository::new(database.connection()).list_all().await);
    assert_eq!(events.len(), 34);
    let ratings = assert_ok!(EventRatingSeaOrmRepository::new(database.connection()).find_all().await);
    assert_eq!(ratings.len(), 34);
}

#[tokio::test]
async fn test_events_since_preloads_relations() {
    let (_dir, config, database) = seeded_store().await;
    assert_ok!(seed::synthesize(&database, &config.seed.fixtures_dir, &[1], test_day()).await);

    let since = test_day() + Duration::hours(22);
    let listings = assert_ok!(EventSeaOrmRepository::new(database.connection()).find_since(since).await);

    let titles: Vec<&str> = listings.iter().map(|l| l.event.title.as_str()).collect();
    assert_eq!(titles, vec!["Match of the Week", "Late Film", "Arts Review"]);

    let late_film = &listings[1];
    let genre = late_film.genre.as_ref().expect("genre preloaded");
    assert_eq!(genre.description, "Movie/Drama");
    assert_eq!(genre.color_hex, "#D64541");
    assert_eq!(late_film.ratings.len(), 1);
    assert_eq!(late_film.ratings[0].value, "15");
    assert_eq!(late_film.channel.as_ref().map(|c| c.id), Some(1));
    assert_eq!(
        late_film.category.as_ref().map(|c| c.description.as_str()),
        Some("Film")
    );
}

#[tokio::test]
async fn test_empty_template_fails_synthesis() {
    let (dir, _config, database) = seeded_store().await;
    let fixtures = dir.path().join("fixtures");
    copy_fixtures(&fixtures);
    write_fixture(&fixtures, "events_template.csv", "");

    let err = seed::synthesize(&database, &fixtures, &[], test_day())
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::EmptyFixture { .. }));
}

#[tokio::test]
async fn test_startup_synthesis_follows_config() {
    let (_dir, mut config, database) = seeded_store().await;

    assert_eq!(assert_ok!(seed::synthesize_on_startup(&database, &config).await), None);

    config.synthesis.enabled = true;
    config.synthesis.channel_ids = vec![2];
    config.synthesis.day_start = Some(test_day());

    assert_eq!(
        assert_ok!(seed::synthesize_on_startup(&database, &config).await),
        Some(17)
    );
}
