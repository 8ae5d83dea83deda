//! SeaORM repository implementations
//!
//! One repository per aggregate. Repositories hold a shared connection and
//! convert entity models into the API models in `crate::models`.

pub mod traits;
pub mod category;
pub mod channel;
pub mod country;
pub mod event;
pub mod event_rating;
pub mod genre;
pub mod network;
pub mod rating;
pub mod timezone;

// Re-export for convenience
pub use category::CategorySeaOrmRepository;
pub use channel::ChannelSeaOrmRepository;
pub use country::CountrySeaOrmRepository;
pub use event::EventSeaOrmRepository;
pub use event_rating::EventRatingSeaOrmRepository;
pub use genre::GenreSeaOrmRepository;
pub use network::NetworkSeaOrmRepository;
pub use rating::RatingSeaOrmRepository;
pub use timezone::TimezoneSeaOrmRepository;
pub use traits::Repository;
