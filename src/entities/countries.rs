use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub region: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::timezones::Entity")]
    Timezones,
    #[sea_orm(has_many = "super::rating_systems::Entity")]
    RatingSystems,
    #[sea_orm(has_many = "super::networks::Entity")]
    Networks,
}

impl Related<super::timezones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timezones.def()
    }
}

impl Related<super::rating_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RatingSystems.def()
    }
}

impl Related<super::networks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Networks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
