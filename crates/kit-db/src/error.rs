//! Database error types for kit-db.
//!
//! Validation failures (`NotFound`, `Conflict`, `InvalidState`) are
//! distinguished from storage failures so callers can map the former to
//! user-facing messages and the latter to a generic failure. Storage
//! failures never leave partial effects behind; multi-statement writes
//! run inside a single transaction.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness constraint was violated (serial_number, email).
    #[error("Duplicate value for unique field '{field}'")]
    Conflict { field: &'static str },

    /// Invalid value encountered (e.g. negative price, bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Shorthand for a missing entity.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Whether this error is a validation failure (caller input problem)
    /// rather than a storage failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Conflict { .. } | Self::InvalidState(_)
        )
    }
}

/// Map a libSQL error from an INSERT/UPDATE into `Conflict` when it is a
/// uniqueness violation on the given field, passing everything else
/// through unchanged.
pub(crate) fn map_unique_violation(err: libsql::Error, field: &'static str) -> StoreError {
    if err.to_string().contains("UNIQUE constraint failed") {
        StoreError::Conflict { field }
    } else {
        StoreError::LibSql(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_classified() {
        assert!(StoreError::not_found("asset", "ast-1").is_validation());
        assert!(StoreError::Conflict { field: "email" }.is_validation());
        assert!(StoreError::InvalidState("negative price".into()).is_validation());
        assert!(!StoreError::NoResult.is_validation());
        assert!(!StoreError::Query("boom".into()).is_validation());
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = StoreError::not_found("user", "usr-42");
        assert_eq!(err.to_string(), "user not found: usr-42");
    }
}
