//! SeaORM-based genre repository
//!
//! Genres carry no color of their own. The display color is looked up in
//! `genre_colors` by nibble level 1, with `DEFAULT_GENRE_COLOR` as fallback.

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::{
    genres,
    prelude::{GenreColors, Genres},
};
use crate::errors::RepositoryResult;
use crate::models::{Genre, resolve_genre_color};

/// Nibble level 1 to color hex
pub type GenreColorMap = HashMap<i32, String>;

#[derive(Clone)]
pub struct GenreSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl GenreSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<Genre>> {
        let colors = load_color_map(&self.connection).await?;
        let models = Genres::find()
            .order_by_asc(genres::Column::NibbleLevel1)
            .order_by_asc(genres::Column::NibbleLevel2)
            .all(&*self.connection)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| model_to_domain(m, &colors))
            .collect())
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Genre>> {
        let Some(model) = Genres::find_by_id(id).one(&*self.connection).await? else {
            return Ok(None);
        };
        let colors = load_color_map(&self.connection).await?;
        Ok(Some(model_to_domain(model, &colors)))
    }
}

pub(crate) async fn load_color_map(db: &DatabaseConnection) -> RepositoryResult<GenreColorMap> {
    let colors = GenreColors::find().all(db).await?;
    Ok(colors
        .into_iter()
        .map(|c| (c.nibble_level_1, c.color_hex))
        .collect())
}

pub(crate) fn model_to_domain(model: genres::Model, colors: &GenreColorMap) -> Genre {
    let color_hex = resolve_genre_color(colors.get(&model.nibble_level_1).map(String::as_str));
    Genre {
        id: model.id,
        nibble_level_1: model.nibble_level_1,
        nibble_level_2: model.nibble_level_2,
        description: model.description,
        color_hex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_GENRE_COLOR;

    fn genre(nibble_level_1: i32) -> genres::Model {
        genres::Model {
            id: 1,
            nibble_level_1,
            nibble_level_2: 0,
            description: "Movie".to_string(),
        }
    }

    #[test]
    fn test_color_resolution() {
        let colors: GenreColorMap = [(1, "#FF0000".to_string()), (2, String::new())].into();

        assert_eq!(model_to_domain(genre(1), &colors).color_hex, "#FF0000");
        assert_eq!(model_to_domain(genre(2), &colors).color_hex, DEFAULT_GENRE_COLOR);
        assert_eq!(model_to_domain(genre(9), &colors).color_hex, DEFAULT_GENRE_COLOR);
    }
}
