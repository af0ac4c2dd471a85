//! In-memory match repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::matches::{Match, MatchId, MatchRepository, MatchWithTeams, TeamSummary};
use crate::domain::team::{TeamId, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::team::InMemoryTeamRepository;

/// In-memory implementation of MatchRepository
///
/// Team summaries are resolved against the shared team table at list time,
/// the way a left join would.
#[derive(Debug)]
pub struct InMemoryMatchRepository {
    matches: RwLock<Vec<Match>>,
    teams: Arc<InMemoryTeamRepository>,
}

impl InMemoryMatchRepository {
    pub fn new(teams: Arc<InMemoryTeamRepository>) -> Self {
        Self {
            matches: RwLock::new(Vec::new()),
            teams,
        }
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn list_with_teams(&self) -> Result<Vec<MatchWithTeams>, DomainError> {
        let mut entries: Vec<Match> = self.matches.read().await.iter().rev().cloned().collect();
        entries.sort_by(|a, b| b.match_date().cmp(&a.match_date()));

        let teams = self.teams.list().await?;
        let summary = |id: &TeamId| teams.iter().find(|t| t.id() == id).map(TeamSummary::from);

        Ok(entries
            .into_iter()
            .map(|entry| MatchWithTeams {
                team1: summary(entry.team1_id()),
                team2: summary(entry.team2_id()),
                entry,
            })
            .collect())
    }

    async fn get(&self, id: &MatchId) -> Result<Option<Match>, DomainError> {
        let matches = self.matches.read().await;
        Ok(matches.iter().find(|m| m.id() == id).cloned())
    }

    async fn insert(&self, entry: Match) -> Result<Match, DomainError> {
        let mut matches = self.matches.write().await;

        if matches.iter().any(|m| m.id() == entry.id()) {
            return Err(DomainError::conflict(format!(
                "Match '{}' already exists",
                entry.id()
            )));
        }

        matches.push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, entry: &Match) -> Result<Match, DomainError> {
        let mut matches = self.matches.write().await;

        let stored = matches
            .iter_mut()
            .find(|m| m.id() == entry.id())
            .ok_or_else(|| DomainError::not_found(format!("Match '{}' not found", entry.id())))?;

        *stored = entry.clone();
        Ok(entry.clone())
    }

    async fn delete(&self, id: &MatchId) -> Result<bool, DomainError> {
        let mut matches = self.matches.write().await;
        let before = matches.len();
        matches.retain(|m| m.id() != id);
        Ok(matches.len() < before)
    }
}
