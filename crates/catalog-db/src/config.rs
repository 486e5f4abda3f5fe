//! # Catalog Configuration
//!
//! Loads database settings from a TOML file and the environment.
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. Config file (`catalog.toml`)
//! 3. Environment variables
//!
//! ## Configuration File Format
//! ```toml
//! # catalog.toml
//! [database]
//! path = "./data/catalog.db"   # or ":memory:"
//! max_connections = 5
//! min_connections = 1
//! connect_timeout_secs = 30
//! idle_timeout_secs = 600
//! run_migrations = true
//! ```
//!
//! ## Environment Variables
//! | Variable                       | Field                    |
//! |--------------------------------|--------------------------|
//! | `CATALOG_DATABASE_PATH`        | `database.path`          |
//! | `CATALOG_MAX_CONNECTIONS`      | `database.max_connections` |
//! | `CATALOG_MIN_CONNECTIONS`      | `database.min_connections` |
//! | `CATALOG_CONNECT_TIMEOUT_SECS` | `database.connect_timeout_secs` |
//! | `CATALOG_IDLE_TIMEOUT_SECS`    | `database.idle_timeout_secs` |
//! | `CATALOG_RUN_MIGRATIONS`       | `database.run_migrations` |

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::pool::DbConfig;

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`CatalogConfig`].
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings are inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Settings
// =============================================================================

/// Database section of `catalog.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file path, or `:memory:`.
    pub path: PathBuf,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_database_path(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            run_migrations: true,
        }
    }
}

/// Top-level catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub database: DatabaseSettings,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let db = &self.database;

        if db.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if db.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if db.min_connections > db.max_connections {
            return Err(ConfigError::Invalid(format!(
                "database.min_connections ({}) exceeds max_connections ({})",
                db.min_connections, db.max_connections
            )));
        }

        Ok(())
    }

    /// Builds the pool configuration.
    ///
    /// A `:memory:` path yields [`DbConfig::in_memory`] whatever the pool
    /// sizes say, since an in-memory database lives on a single connection.
    /// The acquire timeout still applies.
    pub fn db_config(&self) -> DbConfig {
        let db = &self.database;
        if DbConfig::is_memory_path(&db.path) {
            return DbConfig::in_memory()
                .connect_timeout(Duration::from_secs(db.connect_timeout_secs))
                .run_migrations(db.run_migrations);
        }

        DbConfig::new(&db.path)
            .max_connections(db.max_connections)
            .min_connections(db.min_connections)
            .connect_timeout(Duration::from_secs(db.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(db.idle_timeout_secs))
            .run_migrations(db.run_migrations)
    }

    /// Applies overrides from a key lookup (the process environment in
    /// [`CatalogConfig::load`]). Unparseable values are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = &mut self.database;

        if let Some(path) = lookup("CATALOG_DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            db.path = PathBuf::from(path);
        }

        override_parsed(&lookup, "CATALOG_MAX_CONNECTIONS", &mut db.max_connections);
        override_parsed(&lookup, "CATALOG_MIN_CONNECTIONS", &mut db.min_connections);
        override_parsed(&lookup, "CATALOG_CONNECT_TIMEOUT_SECS", &mut db.connect_timeout_secs);
        override_parsed(&lookup, "CATALOG_IDLE_TIMEOUT_SECS", &mut db.idle_timeout_secs);
        override_parsed(&lookup, "CATALOG_RUN_MIGRATIONS", &mut db.run_migrations);
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "catalog", "product-catalog")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *target = value,
            Err(_) => warn!(key, value = %raw, "Ignoring unparseable config override"),
        }
    }
}

fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("com", "catalog", "product-catalog")
        .map(|dirs| dirs.data_dir().join("catalog.db"))
        .unwrap_or_else(|| PathBuf::from("catalog.db"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.run_migrations);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [database]
            path = "/tmp/catalog.db"
            max_connections = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.database.max_connections, 8);
        // Unspecified fields keep their defaults
        assert_eq!(config.database.min_connections, 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"/var/lib/catalog.db\"\nmin_connections = 2").unwrap();

        let config = CatalogConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.database.min_connections, 2);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database\npath = 3").unwrap();

        let err = CatalogConfig::load(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = CatalogConfig::default();
        config.apply_overrides(lookup_from(&[
            ("CATALOG_DATABASE_PATH", ":memory:"),
            ("CATALOG_MAX_CONNECTIONS", "3"),
            ("CATALOG_RUN_MIGRATIONS", "false"),
            ("CATALOG_MIN_CONNECTIONS", "lots"),
            ("CATALOG_IDLE_TIMEOUT_SECS", "120"),
        ]));

        assert_eq!(config.database.path, PathBuf::from(":memory:"));
        assert_eq!(config.database.max_connections, 3);
        assert!(!config.database.run_migrations);
        assert_eq!(config.database.idle_timeout_secs, 120);
        // Unparseable value is ignored
        assert_eq!(config.database.min_connections, 1);
    }

    #[test]
    fn test_validate_connection_bounds() {
        let mut config = CatalogConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        config.database.max_connections = 2;
        config.database.min_connections = 3;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_db_config_for_memory_path() {
        let mut config = CatalogConfig::default();
        config.database.path = PathBuf::from(":memory:");
        config.database.max_connections = 10;
        config.database.connect_timeout_secs = 7;

        let db_config = config.db_config();
        assert_eq!(db_config.max_connections, 1);
        assert!(db_config.is_in_memory());
        assert_eq!(db_config.connect_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_db_config_for_file_path() {
        let mut config = CatalogConfig::default();
        config.database.path = PathBuf::from("/tmp/catalog.db");
        config.apply_overrides(lookup_from(&[
            ("CATALOG_CONNECT_TIMEOUT_SECS", "12"),
            ("CATALOG_IDLE_TIMEOUT_SECS", "90"),
        ]));

        let db_config = config.db_config();
        assert!(!db_config.is_in_memory());
        assert_eq!(db_config.connect_timeout, Duration::from_secs(12));
        assert_eq!(db_config.idle_timeout, Duration::from_secs(90));
    }
}
