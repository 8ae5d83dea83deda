//! Placeholder event synthesis from the daily template
//!
//! Each template row describes one fixed-length slot relative to the start of
//! a day. Synthesis fills the slots for a set of channels and is safe to run
//! repeatedly: a slot whose (channel, start time) pair is held by an active
//! event is skipped. A soft-deleted event frees its slot.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::path::Path;
use tracing::{debug, info};

use super::fixtures::{EVENT_TEMPLATE_FILE, EventTemplateRecord, load_csv};
use crate::database::Database;
use crate::entities::{channels, event_ratings, events, prelude::*};
use crate::errors::SeedResult;

/// Length of every synthesized slot
pub const SLOT_LENGTH_MINUTES: i64 = 15;

/// Fill `channel_ids` with template slots starting at `day_start`
///
/// An empty channel list means every channel in the store. Returns the
/// number of events inserted. There is no transaction around the batch, so
/// slots inserted before a failure remain.
pub async fn synthesize(
    database: &Database,
    fixtures_dir: &Path,
    channel_ids: &[i32],
    day_start: DateTime<Utc>,
) -> SeedResult<usize> {
    let db = &*database.connection;
    let template = load_csv::<EventTemplateRecord>(fixtures_dir, EVENT_TEMPLATE_FILE)?;

    let channel_ids = if channel_ids.is_empty() {
        all_channel_ids(db).await?
    } else {
        channel_ids.to_vec()
    };

    info!(
        "Synthesizing {} template slots for {} channels from {}",
        template.len(),
        channel_ids.len(),
        day_start
    );

    let mut inserted = 0;
    for channel_id in &channel_ids {
        for slot in &template {
            if insert_slot(db, *channel_id, slot, day_start).await? {
                inserted += 1;
            }
        }
    }

    info!("Synthesized {} events", inserted);
    Ok(inserted)
}

async fn all_channel_ids(db: &DatabaseConnection) -> SeedResult<Vec<i32>> {
    Ok(Channels::find()
        .select_only()
        .column(channels::Column::Id)
        .order_by_asc(channels::Column::Id)
        .into_tuple::<i32>()
        .all(db)
        .await?)
}

/// Insert one slot unless an active event holds its (channel, start) pair
async fn insert_slot(
    db: &DatabaseConnection,
    channel_id: i32,
    slot: &EventTemplateRecord,
    day_start: DateTime<Utc>,
) -> SeedResult<bool> {
    let start_time = day_start + Duration::minutes(i64::from(slot.start_minute));
    let end_time = start_time + Duration::minutes(SLOT_LENGTH_MINUTES);

    let existing = Events::find()
        .filter(events::Column::ChannelId.eq(channel_id))
        .filter(events::Column::StartTime.eq(start_time))
        .filter(events::Column::DeletedAt.is_null())
        .count(db)
        .await?;
    if existing > 0 {
        debug!("Skipping slot {} on channel {}: already present", start_time, channel_id);
        return Ok(false);
    }

    let now = Utc::now();
    let event = events::ActiveModel {
        channel_id: Set(channel_id),
        start_time: Set(start_time),
        end_time: Set(end_time),
        title: Set(slot.title.clone()),
        short_description: Set(None),
        extended_description: Set(None),
        genre_id: Set(slot.genre_id),
        category_id: Set(slot.category_id),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    event_ratings::ActiveModel {
        event_id: Set(event.id),
        rating_value_id: Set(slot.rating_value_id),
    }
    .insert(db)
    .await?;

    Ok(true)
}
