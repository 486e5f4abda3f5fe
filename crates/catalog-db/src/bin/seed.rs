//! # Seed Data Generator
//!
//! Populates the catalog database with random products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default) into the configured database
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p catalog-db --bin seed -- --count 500
//!
//! # Specify database path (overrides catalog.toml / CATALOG_DATABASE_PATH)
//! cargo run -p catalog-db --bin seed -- --db ./data/catalog.db
//!
//! # Use a specific config file
//! cargo run -p catalog-db --bin seed -- --config ./catalog.toml
//! ```

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use catalog_core::factory::ProductFactory;
use catalog_db::{CatalogConfig, Database};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 100;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let mut count = DEFAULT_COUNT;
    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if let Some(value) = args.get(i + 1) {
                    count = value.parse().unwrap_or_else(|_| {
                        warn!(value = %value, "Invalid --count, using default");
                        DEFAULT_COUNT
                    });
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if let Some(value) = args.get(i + 1) {
                    db_path = Some(PathBuf::from(value));
                    i += 1;
                }
            }
            "--config" => {
                if let Some(value) = args.get(i + 1) {
                    config_path = Some(PathBuf::from(value));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Product Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>      Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>      Database file path");
                println!("      --config <PATH>  Config file (default: platform config dir)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = CatalogConfig::load(config_path)?;
    if let Some(path) = db_path {
        config.database.path = path;
    }

    info!(
        path = %config.database.path.display(),
        count,
        "Seeding product catalog"
    );

    let db = Database::new(config.db_config()).await?;
    let store = db.products();

    let existing = store.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has products; adding more");
    }

    let start = Instant::now();
    let mut per_category: BTreeMap<&'static str, usize> = BTreeMap::new();

    for mut product in ProductFactory::build_batch(count) {
        store.create(&mut product).await?;
        *per_category.entry(product.category.name()).or_default() += 1;
    }

    let elapsed = start.elapsed();
    for (category, created) in &per_category {
        info!(category, created, "Seeded category");
    }
    info!(
        created = count,
        total = store.count().await?,
        elapsed_ms = elapsed.as_millis() as u64,
        "Seed complete"
    );

    db.close().await;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
