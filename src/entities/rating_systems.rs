use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rating system ids come from the fixture rather than the store
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating_systems")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub country_id: i32,
    pub description: String,
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
    #[sea_orm(has_many = "super::rating_values::Entity")]
    RatingValues,
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Countries.def()
    }
}

impl Related<super::rating_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RatingValues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
