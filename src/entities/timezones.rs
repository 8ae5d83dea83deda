use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Timezone rows are unique per (country_code, timezone_name)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "timezones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_code: String,
    pub timezone_name: String,
    /// Offsets are in minutes from UTC
    pub standard_offset: i32,
    pub dst_offset: i32,
    pub dst_start_day: i32,
    pub dst_start_month: i32,
    pub dst_start_time: Time,
    pub dst_end_day: i32,
    pub dst_end_month: i32,
    pub dst_end_time: Time,
    pub is_default: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::countries::Entity",
        from = "Column::CountryCode",
        to = "super::countries::Column::Code",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Countries,
    #[sea_orm(has_many = "super::networks::Entity")]
    Networks,
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Countries.def()
    }
}

impl Related<super::networks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Networks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
