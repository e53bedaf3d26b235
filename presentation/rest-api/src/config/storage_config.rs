use std::env;
use std::str::FromStr;

use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("config.invalid_storage_driver: {0}")]
    InvalidStorageDriver(String),
    #[error("config.database_url_missing")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageDriver {
    Postgres,
    Memory,
}

impl FromStr for StorageDriver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageDriver::Postgres),
            "memory" => Ok(StorageDriver::Memory),
            other => Err(ConfigError::InvalidStorageDriver(other.to_string())),
        }
    }
}

/// Where catalog and cart data live.
///
/// Environment variables:
/// - STORAGE_DRIVER: "postgres" or "memory" (default: "postgres")
/// - DATABASE_URL: PostgreSQL connection string (required for postgres)
/// - DATABASE_MAX_CONNECTIONS: pool size (default: 5)
/// - MIGRATIONS_PATH: migrations directory (default: "infrastructure/persistence/migrations")
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub driver: StorageDriver,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub migrations_path: String,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let driver = env::var("STORAGE_DRIVER")
            .map(|raw| raw.parse())
            .unwrap_or(Ok(StorageDriver::Postgres))?;

        Ok(Self {
            driver,
            database_url: env::var("DATABASE_URL").ok(),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(5),
            migrations_path: env::var("MIGRATIONS_PATH")
                .unwrap_or_else(|_| "infrastructure/persistence/migrations".to_string()),
        })
    }

    /// Connects to Postgres and brings the schema up to date.
    pub async fn init_database(&self) -> anyhow::Result<PgPool> {
        let url = self
            .database_url
            .clone()
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        let pool = create_postgres_pool(
            &DatabaseConfig::new(url).with_max_connections(self.max_connections),
        )
        .await?;
        run_migrations(&pool, &self.migrations_path).await?;
        tracing::info!(migrations = %self.migrations_path, "database ready");
        Ok(pool)
    }
}
