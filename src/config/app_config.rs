use std::path::Path;

use serde::Deserialize;

use crate::domain::StatusPolicy;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub matches: MatchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Data gateway selection
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    /// Falls back to `DATABASE_URL` when unset
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MatchSettings {
    #[serde(default)]
    pub status_policy: StatusPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

impl StorageSettings {
    /// Resolve into a concrete storage configuration
    pub fn resolve(&self) -> Result<StorageConfig, String> {
        match StorageType::from_str(&self.backend) {
            Some(StorageType::InMemory) => Ok(StorageConfig::in_memory()),
            Some(StorageType::Postgres) => {
                let url = self
                    .database_url
                    .clone()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .ok_or_else(|| {
                        "storage.database_url or DATABASE_URL is required for postgres".to_string()
                    })?;

                Ok(StorageConfig::postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(self.max_connections)
                        .with_connect_timeout(self.connect_timeout_secs),
                ))
            }
            None => Err(format!("Unknown storage backend '{}'", self.backend)),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_dir(Path::new("config"))
    }

    /// Load `default` and `local` from `dir`, then `APP__*` overrides
    ///
    /// Missing files are fine; a file or variable that fails to parse is an error.
    pub fn load_from_dir(dir: &Path) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join("local")).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
