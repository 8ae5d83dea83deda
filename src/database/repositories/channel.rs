//! SeaORM-based channel repository
//!
//! Channels are returned with their network name and their active events.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use super::event::active_events_by;
use crate::entities::{
    channels, events, networks,
    prelude::{Channels, Networks},
};
use crate::errors::RepositoryResult;
use crate::models::{Channel, Event};

#[derive(Clone)]
pub struct ChannelSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl ChannelSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// All channels with their network name
    pub async fn find_all(&self) -> RepositoryResult<Vec<Channel>> {
        let rows = Channels::find()
            .find_also_related(Networks)
            .order_by_asc(channels::Column::Id)
            .all(&*self.connection)
            .await?;

        self.with_events(rows).await
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Channel>> {
        let row = Channels::find_by_id(id)
            .find_also_related(Networks)
            .one(&*self.connection)
            .await?;

        Ok(self.with_events(row.into_iter().collect()).await?.pop())
    }

    /// Channels belonging to one network
    pub async fn find_by_network(&self, network_id: i32) -> RepositoryResult<Vec<Channel>> {
        let rows = Channels::find()
            .filter(channels::Column::NetworkId.eq(network_id))
            .find_also_related(Networks)
            .order_by_asc(channels::Column::Id)
            .all(&*self.connection)
            .await?;

        self.with_events(rows).await
    }

    async fn with_events(
        &self,
        rows: Vec<(channels::Model, Option<networks::Model>)>,
    ) -> RepositoryResult<Vec<Channel>> {
        let ids: Vec<i32> = rows.iter().map(|(channel, _)| channel.id).collect();
        let mut events =
            active_events_by(&self.connection, events::Column::ChannelId, &ids, |e| e.channel_id)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(channel, network)| {
                let channel_events = events.remove(&channel.id).unwrap_or_default();
                model_to_domain(channel, network, channel_events)
            })
            .collect())
    }
}

pub(crate) fn model_to_domain(
    model: channels::Model,
    network: Option<networks::Model>,
    events: Vec<Event>,
) -> Channel {
    Channel {
        id: model.id,
        network_id: model.network_id,
        network_name: network.map(|n| n.description).unwrap_or_default(),
        description: model.description,
        broadcast_start_time: model.broadcast_start_time,
        broadcast_finish_time: model.broadcast_finish_time,
        service_id: model.service_id,
        service_vpid: model.service_vpid,
        service_apid: model.service_apid,
        authority_meta: model.authority_meta,
        logo_name: model.logo_name,
        events,
    }
}
