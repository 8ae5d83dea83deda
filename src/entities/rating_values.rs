use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rating values are seeded before their rating systems, so the link to
/// `rating_systems` exists only at this level and not as a store constraint.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating_values")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub rating_system_id: i32,
    pub value: String,
    pub min_age: i32,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rating_systems::Entity",
        from = "Column::RatingSystemId",
        to = "super::rating_systems::Column::Id"
    )]
    RatingSystems,
    #[sea_orm(has_many = "super::event_ratings::Entity")]
    EventRatings,
}

impl Related<super::rating_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RatingSystems.def()
    }
}

impl Related<super::event_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventRatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
