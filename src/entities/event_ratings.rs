use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join row between events and rating values
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub rating_value_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Events,
    #[sea_orm(
        belongs_to = "super::rating_values::Entity",
        from = "Column::RatingValueId",
        to = "super::rating_values::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RatingValues,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::rating_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RatingValues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
