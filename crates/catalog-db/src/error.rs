//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Bad input (DataValidationError)     SQLite Error (sqlx::Error)        │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  DbError::Validation              DbError::{NotFound, QueryFailed, ...} │
//! │       │                                   │                             │
//! │       └──────────────┬────────────────────┘                             │
//! │                      ▼                                                  │
//! │  Caller checks `is_validation()` to tell "bad input" apart from        │
//! │  "storage unavailable" and picks its own retry policy.                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use catalog_core::DataValidationError;
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Input was rejected before anything was written.
    ///
    /// ## When This Occurs
    /// - `update()`/`delete()` on a product with no id
    /// - `create()` on a product that already has one
    #[error("Validation failed: {0}")]
    Validation(#[from] DataValidationError),

    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `update()` on an id with no row
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a duplicate primary key
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// CHECK or NOT NULL constraint violation.
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored row could not be turned back into a product.
    #[error("Corrupt {entity} row {id}: {reason}")]
    CorruptRow {
        entity: String,
        id: String,
        reason: String,
    },

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a CorruptRow error.
    pub fn corrupt(entity: impl Into<String>, id: impl Into<String>, reason: impl ToString) -> Self {
        DbError::CorruptRow {
            entity: entity.into(),
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the caller sent bad input, as opposed to the
    /// storage layer failing.
    pub fn is_validation(&self) -> bool {
        matches!(self, DbError::Validation(_))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: <table>.<column>"
                // "CHECK constraint failed: <expr>"
                // "NOT NULL constraint failed: <table>.<column>"
                if let Some(field) = msg.split("UNIQUE constraint failed: ").nth(1) {
                    DbError::duplicate(field, "unknown")
                } else if msg.contains("CHECK constraint failed")
                    || msg.contains("NOT NULL constraint failed")
                {
                    DbError::ConstraintViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_distinguished() {
        let err: DbError = DataValidationError::NotPersisted { operation: "updated" }.into();
        assert!(err.is_validation());
        assert!(!DbError::PoolExhausted.is_validation());
        assert!(!DbError::not_found("Product", "abc").is_validation());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_pool_errors() {
        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::PoolExhausted));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            DbError::not_found("Product", "42").to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            DbError::corrupt("Product", "42", "bad category").to_string(),
            "Corrupt Product row 42: bad category"
        );
    }
}
