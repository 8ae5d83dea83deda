//! Centralized error handling for the EPG service
//!
//! This module unifies the error types used across the application layers so
//! that the web layer can map every failure onto a consistent response.
//!
//! # Error Categories
//!
//! - **Database Errors**: SeaORM operations, migrations, connection issues
//! - **Repository Errors**: Data access layer failures and constraint violations
//! - **Seed Errors**: Fixture parsing and reference lookups during bootstrap
//! - **Validation Errors**: Malformed request input
//!
//! # Usage
//!
//! ```rust
//! use epg_service::errors::{AppError, AppResult};
//!
//! async fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for seeding Results
pub type SeedResult<T> = Result<T, SeedError>;
