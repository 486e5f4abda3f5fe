//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  └── DataValidationError  - Bad input, rejected before any mutation    │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError              - Storage failures (wraps validation errors) │
//! │                                                                         │
//! │  Flow: DataValidationError → DbError::Validation → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Data Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while turning untyped input into a [`Product`](crate::Product),
/// or when a record is in the wrong lifecycle state for an operation.
/// Every check runs before the target record is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataValidationError {
    /// A required key is absent from the payload.
    #[error("Invalid product: missing {field}")]
    MissingAttribute { field: String },

    /// A key is present but holds the wrong JSON type.
    ///
    /// ## When This Occurs
    /// - `available` is `"Maybe"` or `1` instead of `true`/`false`
    /// - `name` is a number
    #[error("Invalid type for {expected} [{field}]: {found}")]
    InvalidType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The category name is not one of the fixed category names.
    #[error("Invalid attribute: unknown category '{0}'")]
    InvalidCategory(String),

    /// The price could not be represented exactly.
    #[error("Invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// The text is not a valid product identifier.
    #[error("Invalid product id: '{0}'")]
    InvalidId(String),

    /// A required field is empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The payload is not a JSON object at all.
    #[error("Invalid product: body of request contained bad or no data ({0})")]
    BadPayload(String),

    /// The record has no persisted identifier.
    ///
    /// ## When This Occurs
    /// - `update()` or `delete()` on a record that was never created
    #[error("Product has no id; it must be created before it can be {operation}")]
    NotPersisted { operation: &'static str },

    /// The record already carries a persisted identifier.
    #[error("Product {id} is already persisted")]
    AlreadyPersisted { id: String },
}

impl DataValidationError {
    /// Creates a MissingAttribute error.
    pub fn missing(field: impl Into<String>) -> Self {
        DataValidationError::MissingAttribute {
            field: field.into(),
        }
    }

    /// Creates an InvalidPrice error.
    pub fn invalid_price(value: impl Into<String>, reason: impl Into<String>) -> Self {
        DataValidationError::InvalidPrice {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with DataValidationError.
pub type ValidationResult<T> = Result<T, DataValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_names_the_key() {
        let err = DataValidationError::missing("name");
        assert_eq!(err.to_string(), "Invalid product: missing name");
    }

    #[test]
    fn test_invalid_type_message() {
        let err = DataValidationError::InvalidType {
            field: "available".to_string(),
            expected: "boolean",
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "Invalid type for boolean [available]: string"
        );
    }

    #[test]
    fn test_invalid_category_message() {
        let err = DataValidationError::InvalidCategory("SPACESHUTTLE".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid attribute: unknown category 'SPACESHUTTLE'"
        );
    }
}
