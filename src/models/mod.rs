//! Domain models exposed by the repositories and the web layer
//!
//! Entities in `crate::entities` mirror table rows; the types here are what
//! callers see, with derived attributes (genre color, network timezone,
//! channel network name) already resolved.

pub mod broadcast;
pub mod event;
pub mod reference;

pub use broadcast::*;
pub use event::*;
pub use reference::*;
