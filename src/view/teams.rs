//! Team list screen: choose, create or join

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainError, Team};
use crate::infrastructure::team::{CreateTeamRequest, TeamService};

/// Which panel of the teams page is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamsMode {
    #[default]
    Choice,
    Create,
    Join,
}

#[derive(Debug)]
pub struct TeamsScreen {
    service: Arc<TeamService>,
    mode: TeamsMode,
    teams: Vec<Team>,
}

impl TeamsScreen {
    pub fn new(service: Arc<TeamService>) -> Self {
        Self {
            service,
            mode: TeamsMode::Choice,
            teams: Vec::new(),
        }
    }

    pub fn mode(&self) -> TeamsMode {
        self.mode
    }

    /// Teams as of the last refresh, newest first
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn show_choice(&mut self) {
        self.mode = TeamsMode::Choice;
    }

    pub fn show_create(&mut self) {
        self.mode = TeamsMode::Create;
    }

    /// Open the join panel and load the team list
    pub async fn show_join(&mut self) -> Result<(), DomainError> {
        self.mode = TeamsMode::Join;
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        debug!("Refreshing team list");
        self.teams = self.service.list().await?;
        Ok(())
    }

    /// Create a team and return to the choice panel
    pub async fn create(&mut self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        let team = self.service.create(request).await?;
        self.mode = TeamsMode::Choice;
        self.refresh().await?;
        Ok(team)
    }

    pub async fn join(&mut self, team_id: &str) -> Result<Team, DomainError> {
        let team = self.service.join(team_id).await?;
        self.refresh().await?;
        Ok(team)
    }

    pub async fn delete(&mut self, team_id: &str) -> Result<bool, DomainError> {
        let deleted = self.service.delete(team_id).await?;
        self.refresh().await?;
        Ok(deleted)
    }
}
