//! SeaORM entity definitions for the EPG schema
//!
//! One module per table. Tables are created by the migrations in
//! `crate::database::migrations`; these definitions must stay in step with them.

pub mod prelude;

pub mod categories;
pub mod channels;
pub mod countries;
pub mod event_ratings;
pub mod events;
pub mod genre_colors;
pub mod genres;
pub mod networks;
pub mod rating_systems;
pub mod rating_values;
pub mod timezones;
