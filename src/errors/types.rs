//! Error type definitions for the EPG service
//!
//! This module defines the error types used throughout the application,
//! providing a hierarchical error system that keeps bootstrap failures,
//! data access failures and request failures apart.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors that can surface from a request
/// handler or an operator-triggered task. It uses `thiserror` to provide
/// automatic error trait implementations and proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors (SeaORM)
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Repository layer errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Fixture loading and synthesis errors
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(DbErr),

    /// Constraint violations (unique, foreign key, etc.)
    #[error("Constraint violation: {constraint} - {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Record not found
    #[error("Record not found: {table} with {field} = {value}")]
    RecordNotFound {
        table: String,
        field: String,
        value: String,
    },
}

/// Errors raised while loading fixtures or synthesizing events
#[derive(Error, Debug)]
pub enum SeedError {
    /// Fixture file could not be opened or read
    #[error("Failed to read fixture {path}: {source}")]
    Fixture {
        path: String,
        source: std::io::Error,
    },

    /// Fixture file has no header row
    #[error("Fixture {file} is empty")]
    EmptyFixture { file: String },

    /// A typed field could not be parsed
    #[error("Malformed field in {file} line {line}, column {column} ('{value}'): {reason}")]
    MalformedField {
        file: String,
        line: usize,
        column: usize,
        value: String,
        reason: String,
    },

    /// A row is shorter than the fixture layout requires
    #[error("Missing column {column} in {file} line {line}")]
    MissingColumn {
        file: String,
        line: usize,
        column: usize,
    },

    /// A cross-reference could not be resolved
    #[error("Lookup failed: {entity} with {key} not found")]
    LookupFailed { entity: String, key: String },

    /// Insert or query failure while seeding
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: ToString>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::ConstraintViolation {
                constraint: "unique".to_string(),
                message,
            },
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => Self::ConstraintViolation {
                constraint: "foreign_key".to_string(),
                message,
            },
            _ => Self::Database(err),
        }
    }
}

impl RepositoryError {
    /// Create a record not found error
    pub fn record_not_found<T: Into<String>, F: Into<String>, V: ToString>(
        table: T,
        field: F,
        value: V,
    ) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            field: field.into(),
            value: value.to_string(),
        }
    }
}

impl SeedError {
    /// Create a lookup failure for a missing cross-reference
    pub fn lookup_failed<E: Into<String>, K: Into<String>>(entity: E, key: K) -> Self {
        Self::LookupFailed {
            entity: entity.into(),
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failed_message_names_entity_and_key() {
        let err = SeedError::lookup_failed("timezone", "GB/Europe/Atlantis");
        assert_eq!(
            err.to_string(),
            "Lookup failed: timezone with GB/Europe/Atlantis not found"
        );
    }

    #[test]
    fn test_generic_db_error_stays_database_variant() {
        let err: RepositoryError = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[test]
    fn test_app_error_wraps_seed_error() {
        let err: AppError = SeedError::EmptyFixture {
            file: "genre.csv".to_string(),
        }
        .into();
        assert!(err.to_string().contains("genre.csv"));
    }
}
