//! # catalog-core: Pure Model Layer for the Product Catalog
//!
//! This crate holds the product model as plain types and pure functions,
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Catalog Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Caller (REST controller, CLI, seed binary)             │   │
//! │  │      decoded JSON body ──► Product::deserialize / serialize     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   price   │  │ validation │  │  factory  │  │   │
//! │  │   │  Product  │  │   Price   │  │  payload   │  │ test data │  │   │
//! │  │   │ Category  │  │  Decimal  │  │  checks    │  │ (feature) │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 catalog-db (Database Layer)                     │   │
//! │  │            ProductStore, finders, migrations (SQLite)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId, Category)
//! - [`price`] - Exact decimal price (no floating point!)
//! - [`validation`] - Payload validation for deserialization
//! - [`error`] - Domain error types
//! - `factory` - Random products for tests (feature `factory`)
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{Category, Product};
//! use serde_json::json;
//!
//! let product = Product::from_payload(&json!({
//!     "name": "Fedora",
//!     "description": "A red hat",
//!     "price": "12.50",
//!     "available": true,
//!     "category": "CLOTHS",
//! }))
//! .unwrap();
//!
//! assert_eq!(product.category, Category::Cloths);
//! assert_eq!(product.to_string(), "<Product Fedora id=[None]>");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod price;
pub mod types;
pub mod validation;

#[cfg(feature = "factory")]
pub mod factory;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{DataValidationError, ValidationResult};
pub use price::Price;
pub use types::{Category, Product, ProductId};
