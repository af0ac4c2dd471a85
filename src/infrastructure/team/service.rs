//! Team service - the team registry

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::DomainError;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: String,
    pub max_members: i64,
    pub logo_url: Option<String>,
}

/// Request for editing a team's metadata
#[derive(Debug, Clone)]
pub struct UpdateTeamRequest {
    pub name: String,
    pub description: String,
    pub max_members: i64,
    pub logo_url: Option<String>,
}

/// Team registry: create, list, edit, join and delete teams
#[derive(Debug)]
pub struct TeamService<R: TeamRepository + ?Sized = dyn TeamRepository> {
    repository: Arc<R>,
}

impl<R: TeamRepository + ?Sized> TeamService<R> {
    /// Create a new team service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new team; membership always starts at zero
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(name = %request.name, max_members = request.max_members, "Creating team");

        let mut team = Team::new(request.name, request.description, request.max_members)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(logo_url) = request.logo_url {
            team = team.with_logo_url(logo_url);
        }

        self.repository.insert(team).await
    }

    /// Get a team by ID; `Ok(None)` when no such team exists
    pub async fn get(&self, id: &str) -> Result<Option<Team>, DomainError> {
        let team_id = parse_team_id(id)?;
        self.repository.get(&team_id).await
    }

    /// List all teams, newest first
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        debug!("Listing teams");
        self.repository.list().await
    }

    /// Edit a team's name, description, capacity and logo
    pub async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        info!(id = %id, max_members = request.max_members, "Updating team");

        let mut team = self.require(id).await?;

        team.update_details(
            request.name,
            request.description,
            request.max_members,
            request.logo_url,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository.update(&team).await
    }

    /// Join a team, taking one open slot
    ///
    /// The team is re-read before the capacity check and the increment is a
    /// single conditional write, so a full team is never overrun even when
    /// joins race.
    pub async fn join(&self, id: &str) -> Result<Team, DomainError> {
        info!(id = %id, "Joining team");

        let team = self.require(id).await?;

        if team.is_full() {
            warn!(id = %id, max_members = team.max_members(), "Join rejected, team is full");
            return Err(DomainError::capacity_exceeded(id, team.max_members()));
        }

        match self.repository.increment_members(team.id()).await? {
            Some(joined) => Ok(joined),
            None => {
                // Lost a race: the team filled up or vanished after the read
                let current = self.require(id).await?;
                warn!(id = %id, "Join rejected after concurrent update");
                Err(DomainError::capacity_exceeded(id, current.max_members()))
            }
        }
    }

    /// Delete a team; matches referencing it are left untouched
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting team");

        let team_id = parse_team_id(id)?;
        self.repository.delete(&team_id).await
    }

    /// Check if a team exists
    pub async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        let team_id = parse_team_id(id)?;
        self.repository.exists(&team_id).await
    }

    async fn require(&self, id: &str) -> Result<Team, DomainError> {
        let team_id = parse_team_id(id)?;

        self.repository
            .get(&team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))
    }
}

fn parse_team_id(id: &str) -> Result<TeamId, DomainError> {
    TeamId::new(id).map_err(|e| DomainError::validation(e.to_string()))
}
