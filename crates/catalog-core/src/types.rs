//! # Domain Types
//!
//! Core domain types of the product catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │       Product        │   │    Category     │   │      Price      │  │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │  │
//! │  │  id: Option<Id>      │   │  UNKNOWN        │   │  i64 cents      │  │
//! │  │  name                │   │  CLOTHS         │   │  Decimal view   │  │
//! │  │  description         │   │  FOOD           │   │  "12.50"        │  │
//! │  │  price: Price        │   │  HOUSEWARES     │   └─────────────────┘  │
//! │  │  available: bool     │   │  AUTOMOTIVE     │                        │
//! │  │  category: Category  │   │  TOOLS          │                        │
//! │  └──────────────────────┘   └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Lifecycle
//! A `Product` starts with `id == None`. The store assigns an id exactly
//! once, on create; [`Product::assign_id`] refuses to overwrite it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{DataValidationError, ValidationResult};
use crate::price::Price;
use crate::validation::ProductFields;

// =============================================================================
// Product Id
// =============================================================================

/// Surrogate product identifier (UUID v4).
///
/// Stored as canonical hyphenated text. UUIDs are never reused, so an id
/// stays unique across every product ever created, deleted ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        ProductId(Uuid::new_v4())
    }
}

impl FromStr for ProductId {
    type Err = DataValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(ProductId)
            .map_err(|_| DataValidationError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Category
// =============================================================================

/// The fixed set of product categories.
///
/// Each variant maps to exactly one upper-case name (`CLOTHS`, `FOOD`, ...)
/// and back. Matching is case-sensitive: `"food"` is not a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    /// Returns the canonical name.
    pub const fn name(&self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }
}

impl FromStr for Category {
    type Err = DataValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| DataValidationError::InvalidCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product, persisted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Assigned by the store on create; `None` until then.
    id: Option<ProductId>,

    /// Display name. Never empty.
    pub name: String,

    /// Free text; may be empty.
    pub description: String,

    pub price: Price,

    pub available: bool,

    pub category: Category,
}

impl Product {
    /// Creates a new, unpersisted product.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        available: bool,
        category: Category,
    ) -> Self {
        Product {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// Builds a new, unpersisted product from an untyped payload.
    ///
    /// Applies the same checks as [`Product::deserialize`].
    pub fn from_payload(data: &Value) -> ValidationResult<Self> {
        Ok(ProductFields::from_payload(data)?.into_product())
    }

    /// Returns the persisted identifier, if any.
    #[inline]
    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    /// Attaches a store-generated identifier.
    ///
    /// ## Errors
    /// `AlreadyPersisted` if the product already has an id. Identity never
    /// changes after the first assignment.
    pub fn assign_id(&mut self, id: ProductId) -> ValidationResult<()> {
        if let Some(existing) = self.id {
            return Err(DataValidationError::AlreadyPersisted {
                id: existing.to_string(),
            });
        }
        self.id = Some(id);
        Ok(())
    }

    /// Returns the untyped mapping form of this product.
    ///
    /// ## Output
    /// ```json
    /// {
    ///   "id": "5f0c...",            // or null before create
    ///   "name": "Fedora",
    ///   "description": "A red hat",
    ///   "price": "12.50",           // decimal string, never a float
    ///   "available": true,
    ///   "category": "CLOTHS"
    /// }
    /// ```
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id.map(|id| id.to_string()),
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.name(),
        })
    }

    /// Overwrites the product's fields from an untyped payload.
    ///
    /// Every field is validated before anything is written, so on error the
    /// product is left exactly as it was. The `id` is never touched; an `id`
    /// key in the payload is ignored.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::{Category, Product};
    /// use serde_json::json;
    ///
    /// let mut product = Product::new("Fedora", "A red hat", "12.50".parse().unwrap(), true, Category::Cloths);
    /// let bad = json!({
    ///     "name": "Fedora", "description": "", "price": "12.50",
    ///     "available": "Maybe", "category": "CLOTHS"
    /// });
    /// assert!(product.deserialize(&bad).is_err());
    /// assert_eq!(product.description, "A red hat");
    /// ```
    pub fn deserialize(&mut self, data: &Value) -> ValidationResult<()> {
        let fields = ProductFields::from_payload(data)?;
        fields.apply_to(self);
        Ok(())
    }
}

/// Short form used in logs: `<Product Fedora id=[None]>`.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
