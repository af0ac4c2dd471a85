//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::DomainError;

/// Data gateway for the `teams` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// List all teams, newest first
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// Get a team by ID; `None` when no row matches
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Insert a new team
    async fn insert(&self, team: Team) -> Result<Team, DomainError>;

    /// Persist edited metadata (name, description, capacity, logo, updated_at)
    ///
    /// Fails with `NotFound` when the team is gone and with `Validation` when
    /// the stored membership no longer fits the new capacity.
    async fn update(&self, team: &Team) -> Result<Team, DomainError>;

    /// Atomically add one member if a slot is open
    ///
    /// Returns `None` when the team is full or does not exist; the check and
    /// the increment happen in one step so concurrent joins cannot overrun.
    async fn increment_members(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Delete a team by ID, returns true if a row was removed
    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError>;

    /// Check if a team exists
    async fn exists(&self, id: &TeamId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
