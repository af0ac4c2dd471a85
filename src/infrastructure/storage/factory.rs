//! Storage factory for runtime gateway selection

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::domain::{DomainError, MatchRepository, TeamRepository};
use crate::infrastructure::matches::{InMemoryMatchRepository, PostgresMatchRepository};
use crate::infrastructure::team::{InMemoryTeamRepository, PostgresTeamRepository};

use super::postgres::PostgresConfig;

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Creates a PostgreSQL configuration from a URL
    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The pair of data gateways the services run against
#[derive(Debug, Clone)]
pub struct Gateways {
    pub teams: Arc<dyn TeamRepository>,
    pub matches: Arc<dyn MatchRepository>,
    /// Present when backed by PostgreSQL
    pub pool: Option<PgPool>,
}

/// Factory for creating gateway instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates both gateways based on the configuration
    pub async fn create(config: &StorageConfig) -> Result<Gateways, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory storage");
                Ok(Self::create_in_memory())
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    max_connections = pg_config.max_connections,
                    "Connecting to PostgreSQL"
                );
                let pool = pg_config.connect().await?;
                Ok(Self::create_postgres(pool))
            }
        }
    }

    /// Creates in-memory gateways sharing one team table
    pub fn create_in_memory() -> Gateways {
        let teams = Arc::new(InMemoryTeamRepository::new());
        let matches = Arc::new(InMemoryMatchRepository::new(Arc::clone(&teams)));

        Gateways {
            teams,
            matches,
            pool: None,
        }
    }

    /// Creates PostgreSQL gateways over an existing pool
    pub fn create_postgres(pool: PgPool) -> Gateways {
        Gateways {
            teams: Arc::new(PostgresTeamRepository::new(pool.clone())),
            matches: Arc::new(PostgresMatchRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }
}
