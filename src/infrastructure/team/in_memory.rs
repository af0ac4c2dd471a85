//! In-memory team repository implementation

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::DomainError;

/// In-memory implementation of TeamRepository
///
/// Rows are kept in insertion order so that teams created within the same
/// clock tick still list newest first.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<Vec<Team>>,
}

impl InMemoryTeamRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.read().await;
        let mut result: Vec<Team> = teams.iter().rev().cloned().collect();

        // Stable sort keeps later inserts first on equal timestamps
        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(result)
    }

    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let teams = self.teams.read().await;
        Ok(teams.iter().find(|t| t.id() == id).cloned())
    }

    async fn insert(&self, team: Team) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().await;

        if teams.iter().any(|t| t.id() == team.id()) {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.id()
            )));
        }

        teams.push(team.clone());
        Ok(team)
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().await;

        let stored = teams
            .iter_mut()
            .find(|t| t.id() == team.id())
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", team.id())))?;

        // Membership is owned by the store; only metadata comes from the caller
        let mut next = stored.clone();
        next.update_details(
            team.name(),
            team.description(),
            i64::from(team.max_members()),
            team.logo_url().map(String::from),
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        *stored = next.clone();
        Ok(next)
    }

    async fn increment_members(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let mut teams = self.teams.write().await;

        let Some(team) = teams.iter_mut().find(|t| t.id() == id) else {
            return Ok(None);
        };

        if team.add_member().is_err() {
            return Ok(None);
        }

        Ok(Some(team.clone()))
    }

    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError> {
        let mut teams = self.teams.write().await;
        let before = teams.len();
        teams.retain(|t| t.id() != id);
        Ok(teams.len() < before)
    }

    async fn exists(&self, id: &TeamId) -> Result<bool, DomainError> {
        let teams = self.teams.read().await;
        Ok(teams.iter().any(|t| t.id() == id))
    }
}
