//! Esports Hub API
//!
//! Team registry and match ledger for esports tournaments:
//! - Teams with capacity-checked membership
//! - Matches pairing two teams, with scores and status
//! - In-memory or PostgreSQL data gateway
//! - View state for the team and match screens

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod view;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::{run_storage_migrations, StorageFactory};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state from configuration
///
/// A PostgreSQL backend gets its pending migrations applied before any
/// service is built.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage = config
        .storage
        .resolve()
        .map_err(|e| anyhow::anyhow!("Invalid storage configuration: {}", e))?;

    info!(backend = ?storage.storage_type(), "Initializing data gateway");
    let gateways = StorageFactory::create(&storage).await?;

    if let Some(pool) = &gateways.pool {
        let applied = run_storage_migrations(pool).await?;
        info!(applied, "Storage migrations checked");
    }

    let state = AppState::from_gateways(&gateways, config.matches.status_policy);
    info!(policy = ?state.match_service.policy(), "Match status policy");

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_state_uses_memory() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.match_service.policy(), domain::StatusPolicy::Unrestricted);
        assert!(state.team_service.list().await.unwrap().is_empty());
        assert!(state.match_service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_backend_fails() {
        let mut config = AppConfig::default();
        config.storage.backend = "cassandra".to_string();

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
