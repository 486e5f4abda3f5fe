//! # catalog-db: Database Layer for the Product Catalog
//!
//! This crate provides database access for the product catalog.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Catalog Data Flow                           │
//! │                                                                         │
//! │  Caller (controller, seed binary, tests)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ ProductStore  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ ProductQuery  │    │  (embedded)  │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   ┌───────┴───────┐                                            │   │
//! │  │   │ CatalogConfig │  catalog.toml + CATALOG_* env               │   │
//! │  │   └───────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - File and environment configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - ProductStore and finder queries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{CatalogConfig, Database};
//!
//! let config = CatalogConfig::load(None)?;
//! let db = Database::new(config.db_config()).await?;
//!
//! let tools = db.products().find_by_category(Category::Tools).fetch_all().await?;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{CatalogConfig, ConfigError};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::product::{ProductFilter, ProductQuery, ProductStore};
