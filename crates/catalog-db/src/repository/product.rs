//! # Product Store
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD: `create`, `update`, `delete`, `find`, `all`
//! - Equality finders by name, availability, category and price
//!
//! ## Finders Are Lazy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Finder Runs                                    │
//! │                                                                         │
//! │  store.find_by_category(Category::Food)                                │
//! │       │   (no SQL yet: just pool handle + filter)                       │
//! │       ▼                                                                 │
//! │  ProductQuery { filter: Category(FOOD) }                               │
//! │       │                                                                 │
//! │       ├── .count().await     → SELECT COUNT(*) ... WHERE category = ?  │
//! │       ├── .fetch_all().await → SELECT ...          WHERE category = ?  │
//! │       └── .first().await     → SELECT ... WHERE category = ? LIMIT 1   │
//! │                                                                         │
//! │  The same query value can be awaited again; every run sees the latest  │
//! │  committed state. No ordering is promised.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use catalog_core::validation::validate_product_name;
use catalog_core::{Category, DataValidationError, Price, Product, ProductId};

const SELECT_PRODUCTS: &str =
    "SELECT id, name, description, price_cents, available, category FROM products";

const SELECT_PRODUCT_BY_ID: &str =
    "SELECT id, name, description, price_cents, available, category FROM products WHERE id = ?1";

const COUNT_PRODUCTS: &str = "SELECT COUNT(*) FROM products";

// =============================================================================
// Row Mapping
// =============================================================================

/// One row of the `products` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price_cents: i64,
    available: bool,
    category: Category,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id: ProductId = row
            .id
            .parse()
            .map_err(|e| DbError::corrupt("Product", &row.id, e))?;
        let price = Price::from_cents(row.price_cents)
            .map_err(|e| DbError::corrupt("Product", &row.id, e))?;

        let mut product = Product::new(row.name, row.description, price, row.available, row.category);
        product.assign_id(id)?;
        Ok(product)
    }
}

fn into_products(rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
    rows.into_iter().map(Product::try_from).collect()
}

// =============================================================================
// Product Store
// =============================================================================

/// Bridges [`Product`] records and the `products` table.
///
/// ## Usage
/// ```rust,ignore
/// let store = db.products();
///
/// let mut hat = Product::new("Fedora", "A red hat", "12.50".parse()?, true, Category::Cloths);
/// store.create(&mut hat).await?;          // hat.id() is now Some(..)
///
/// hat.description = "A blue hat".into();
/// store.update(&hat).await?;
///
/// let cloths = store.find_by_category(Category::Cloths).fetch_all().await?;
/// store.delete(&hat).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    /// Creates a new ProductStore.
    pub fn new(pool: SqlitePool) -> Self {
        ProductStore { pool }
    }

    /// Persists a new product and assigns its id.
    ///
    /// The insert runs in a transaction; the id is written into `product`
    /// only after commit, so a failed create leaves `product.id()` as `None`.
    ///
    /// ## Errors
    /// * `DbError::Validation` - product already has an id, or empty name
    /// * `DbError::UniqueViolation` / `ConstraintViolation` - rejected by SQLite
    pub async fn create(&self, product: &mut Product) -> DbResult<()> {
        if let Some(existing) = product.id() {
            return Err(DataValidationError::AlreadyPersisted {
                id: existing.to_string(),
            }
            .into());
        }
        validate_product_name(&product.name)?;

        let id = ProductId::generate();
        debug!(%id, name = %product.name, "Creating product");

        // Dropping `tx` on an early return rolls the insert back.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, available, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(id.to_string())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.available)
        .bind(product.category)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        product.assign_id(id)?;
        Ok(())
    }

    /// Overwrites every stored field with the product's current values.
    ///
    /// ## Errors
    /// * `DbError::Validation` - product has no id (nothing is written)
    /// * `DbError::NotFound` - no row with that id
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        let id = product
            .id()
            .ok_or(DataValidationError::NotPersisted { operation: "updated" })?;
        validate_product_name(&product.name)?;

        debug!(%id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                available = ?5,
                category = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.available)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id.to_string()));
        }

        Ok(())
    }

    /// Removes the product's row.
    ///
    /// Deleting an id that has no row (already deleted) is not an error.
    ///
    /// ## Errors
    /// * `DbError::Validation` - product has no id
    pub async fn delete(&self, product: &Product) -> DbResult<()> {
        let id = product
            .id()
            .ok_or(DataValidationError::NotPersisted { operation: "deleted" })?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        debug!(%id, rows = result.rows_affected(), "Deleted product");
        Ok(())
    }

    /// Returns every stored product, in no particular order.
    pub async fn all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(SELECT_PRODUCTS)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed all products");
        into_products(rows)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn find(&self, id: ProductId) -> DbResult<Option<Product>> {
        debug!(%id, "Finding product");

        let row = sqlx::query_as::<_, ProductRow>(SELECT_PRODUCT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Products whose name equals `name` exactly (case-sensitive).
    pub fn find_by_name(&self, name: impl Into<String>) -> ProductQuery {
        self.query(ProductFilter::Name(name.into()))
    }

    /// Products whose availability equals `available`.
    pub fn find_by_availability(&self, available: bool) -> ProductQuery {
        self.query(ProductFilter::Availability(available))
    }

    /// Products in `category`.
    pub fn find_by_category(&self, category: Category) -> ProductQuery {
        self.query(ProductFilter::Category(category))
    }

    /// Products whose price equals `price` exactly.
    pub fn find_by_price(&self, price: Price) -> ProductQuery {
        self.query(ProductFilter::Price(price))
    }

    /// Like [`find_by_price`](Self::find_by_price), for a price that arrives
    /// as text. The text is parsed as a decimal first.
    ///
    /// ## Errors
    /// * `DbError::Validation` - text is not a valid price
    pub fn find_by_price_str(&self, price: &str) -> DbResult<ProductQuery> {
        Ok(self.find_by_price(price.parse()?))
    }

    /// Counts every stored product.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(COUNT_PRODUCTS)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    fn query(&self, filter: ProductFilter) -> ProductQuery {
        ProductQuery {
            pool: self.pool.clone(),
            filter,
        }
    }
}

// =============================================================================
// Finder Queries
// =============================================================================

/// The single-column equality predicate behind a finder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    Name(String),
    Availability(bool),
    Category(Category),
    Price(Price),
}

impl ProductFilter {
    /// Column the filter compares against.
    pub fn column(&self) -> &'static str {
        match self {
            ProductFilter::Name(_) => "name",
            ProductFilter::Availability(_) => "available",
            ProductFilter::Category(_) => "category",
            ProductFilter::Price(_) => "price_cents",
        }
    }
}

/// A lazy, re-runnable finder result.
///
/// Holds a pool handle and a [`ProductFilter`]; nothing touches the
/// database until one of the async methods is awaited.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pool: SqlitePool,
    filter: ProductFilter,
}

impl ProductQuery {
    /// Runs the query and returns every matching product.
    pub async fn fetch_all(&self) -> DbResult<Vec<Product>> {
        let mut builder = self.builder(SELECT_PRODUCTS);
        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!(
            column = self.filter.column(),
            count = rows.len(),
            "Finder returned products"
        );
        into_products(rows)
    }

    /// Runs the query and returns any one matching product.
    pub async fn first(&self) -> DbResult<Option<Product>> {
        let mut builder = self.builder(SELECT_PRODUCTS);
        builder.push(" LIMIT 1");
        let row = builder
            .build_query_as::<ProductRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Counts matching products without loading them.
    pub async fn count(&self) -> DbResult<i64> {
        let mut builder = self.builder(COUNT_PRODUCTS);
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    fn builder(&self, select: &str) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(select);
        builder.push(" WHERE ").push(self.filter.column()).push(" = ");

        match &self.filter {
            ProductFilter::Name(name) => builder.push_bind(name.clone()),
            ProductFilter::Availability(available) => builder.push_bind(*available),
            ProductFilter::Category(category) => builder.push_bind(*category),
            ProductFilter::Price(price) => builder.push_bind(price.cents()),
        };

        builder
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
