pub use super::categories::Entity as Categories;
pub use super::channels::Entity as Channels;
pub use super::countries::Entity as Countries;
pub use super::event_ratings::Entity as EventRatings;
pub use super::events::Entity as Events;
pub use super::genre_colors::Entity as GenreColors;
pub use super::genres::Entity as Genres;
pub use super::networks::Entity as Networks;
pub use super::rating_systems::Entity as RatingSystems;
pub use super::rating_values::Entity as RatingValues;
pub use super::timezones::Entity as Timezones;
