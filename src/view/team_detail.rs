//! Single-team screen with an edit form

use std::sync::Arc;

use crate::domain::{DomainError, Team, TeamId};
use crate::infrastructure::team::{TeamService, UpdateTeamRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMode {
    #[default]
    Viewing,
    Editing,
}

#[derive(Debug)]
pub struct TeamDetailScreen {
    service: Arc<TeamService>,
    team_id: TeamId,
    team: Option<Team>,
    mode: DetailMode,
}

impl TeamDetailScreen {
    /// Open the screen and load the team; a missing team leaves `team()` empty
    pub async fn open(service: Arc<TeamService>, team_id: TeamId) -> Result<Self, DomainError> {
        let mut screen = Self {
            service,
            team_id,
            team: None,
            mode: DetailMode::Viewing,
        };

        screen.refresh().await?;
        Ok(screen)
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref()
    }

    pub fn mode(&self) -> DetailMode {
        self.mode
    }

    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        self.team = self.service.get(self.team_id.as_str()).await?;
        Ok(())
    }

    /// Switch to the edit form, prefilled from the loaded team
    pub fn start_editing(&mut self) -> Result<UpdateTeamRequest, DomainError> {
        let team = self
            .team
            .as_ref()
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", self.team_id)))?;

        self.mode = DetailMode::Editing;

        Ok(UpdateTeamRequest {
            name: team.name().to_string(),
            description: team.description().to_string(),
            max_members: i64::from(team.max_members()),
            logo_url: team.logo_url().map(String::from),
        })
    }

    pub fn cancel_editing(&mut self) {
        self.mode = DetailMode::Viewing;
    }

    /// Save the form; the screen stays in edit mode when the update fails
    pub async fn save(&mut self, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        if self.mode != DetailMode::Editing {
            return Err(DomainError::validation("Team is not being edited"));
        }

        let updated = self.service.update(self.team_id.as_str(), request).await?;
        self.refresh().await?;
        self.mode = DetailMode::Viewing;
        Ok(updated)
    }
}
