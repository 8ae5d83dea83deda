use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "networks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_id: i32,
    pub timezone_id: i32,
    pub service_id: i32,
    pub description: String,
    pub start_time: DateTimeUtc,
    pub finish_time: DateTimeUtc,
    pub crid_description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::countries::Entity",
        from = "Column::CountryId",
        to = "super::countries::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Countries,
    #[sea_orm(
        belongs_to = "super::timezones::Entity",
        from = "Column::TimezoneId",
        to = "super::timezones::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Timezones,
    #[sea_orm(has_many = "super::channels::Entity")]
    Channels,
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Countries.def()
    }
}

impl Related<super::timezones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timezones.def()
    }
}

impl Related<super::channels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Channels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
