//! # Validation Module
//!
//! Turns untyped payloads into validated product fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Reject, Then Apply                                 │
//! │                                                                         │
//! │  serde_json::Value (decoded request body)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductFields::from_payload  ← THIS MODULE                            │
//! │  ├── not an object?          → BadPayload                              │
//! │  ├── name         missing / not a string / empty                       │
//! │  ├── description  missing / not a string                               │
//! │  ├── price        missing / not a decimal / sub-cent / negative        │
//! │  ├── available    missing / not a JSON boolean ("Maybe" rejected)      │
//! │  └── category     missing / not a string / unknown name                │
//! │       │                                                                 │
//! │       ▼  (all checks passed)                                            │
//! │  ProductFields::apply_to(&mut product)  ← infallible                   │
//! │                                                                         │
//! │  A failed check returns before the product is touched.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::validate_product_name;
//!
//! assert!(validate_product_name("Fedora").is_ok());
//! assert!(validate_product_name("   ").is_err());
//! ```

use serde_json::{Map, Value};

use crate::error::{DataValidationError, ValidationResult};
use crate::price::Price;
use crate::types::{Category, Product};

/// Keys every product payload must carry, in check order.
pub const REQUIRED_KEYS: [&str; 5] = ["name", "description", "price", "available", "category"];

// =============================================================================
// Product Fields
// =============================================================================

/// The validated, typed content of a product payload.
///
/// Holding these separately from [`Product`] is what makes
/// deserialization all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub available: bool,
    pub category: Category,
}

impl ProductFields {
    /// Validates every field of `data`.
    ///
    /// Keys are checked in [`REQUIRED_KEYS`] order and the first failure is
    /// returned. Unknown keys are ignored.
    pub fn from_payload(data: &Value) -> ValidationResult<Self> {
        let object = data.as_object().ok_or_else(|| {
            DataValidationError::BadPayload(format!("expected an object, got {}", json_type_name(data)))
        })?;

        let name = expect_str(object, "name")?;
        validate_product_name(name)?;

        let description = expect_str(object, "description")?;
        let price = parse_price(required(object, "price")?)?;
        let available = expect_bool(object, "available")?;
        let category = parse_category(required(object, "category")?)?;

        Ok(ProductFields {
            name: name.to_string(),
            description: description.to_string(),
            price,
            available,
            category,
        })
    }

    /// Writes the fields into `product`. Identity is left alone.
    pub fn apply_to(self, product: &mut Product) {
        product.name = self.name;
        product.description = self.description;
        product.price = self.price;
        product.available = self.available;
        product.category = self.category;
    }

    /// Builds a new, unpersisted product.
    pub fn into_product(self) -> Product {
        Product::new(
            self.name,
            self.description,
            self.price,
            self.available,
            self.category,
        )
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(DataValidationError::Required {
            field: "name".to_string(),
        });
    }
    Ok(())
}

/// Parses a price from a JSON number or numeric string.
///
/// JSON numbers are read through their text form, so `12.5` becomes the
/// decimal `12.50` without ever being compared as a float.
pub fn parse_price(value: &Value) -> ValidationResult<Price> {
    match value {
        Value::Number(number) => number.to_string().parse(),
        Value::String(text) => text.parse(),
        other => Err(DataValidationError::InvalidType {
            field: "price".to_string(),
            expected: "decimal",
            found: json_type_name(other),
        }),
    }
}

/// Parses a category from its exact name.
pub fn parse_category(value: &Value) -> ValidationResult<Category> {
    match value {
        Value::String(name) => name.parse(),
        other => Err(DataValidationError::InvalidType {
            field: "category".to_string(),
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

fn required<'a>(object: &'a Map<String, Value>, key: &str) -> ValidationResult<&'a Value> {
    object.get(key).ok_or_else(|| DataValidationError::missing(key))
}

fn expect_str<'a>(object: &'a Map<String, Value>, key: &str) -> ValidationResult<&'a str> {
    match required(object, key)? {
        Value::String(text) => Ok(text),
        other => Err(DataValidationError::InvalidType {
            field: key.to_string(),
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

fn expect_bool(object: &Map<String, Value>, key: &str) -> ValidationResult<bool> {
    match required(object, key)? {
        Value::Bool(flag) => Ok(*flag),
        other => Err(DataValidationError::InvalidType {
            field: key.to_string(),
            expected: "boolean",
            found: json_type_name(other),
        }),
    }
}

/// Returns the JSON type name of a value, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
