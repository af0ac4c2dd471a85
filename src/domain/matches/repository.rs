//! Match repository trait

use async_trait::async_trait;

use super::entity::{Match, MatchId, MatchWithTeams};
use crate::domain::DomainError;

/// Data gateway for the `matches` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync + std::fmt::Debug {
    /// List all matches by match date, latest first, joined with team summaries
    async fn list_with_teams(&self) -> Result<Vec<MatchWithTeams>, DomainError>;

    /// Get a match by ID
    async fn get(&self, id: &MatchId) -> Result<Option<Match>, DomainError>;

    /// Insert a new match
    async fn insert(&self, entry: Match) -> Result<Match, DomainError>;

    /// Replace every field of an existing match
    async fn update(&self, entry: &Match) -> Result<Match, DomainError>;

    /// Delete a match by ID, returns true if a row was removed
    async fn delete(&self, id: &MatchId) -> Result<bool, DomainError>;
}
