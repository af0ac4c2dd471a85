//! Match list screen with a create/edit form

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainError, Match, MatchId, MatchWithTeams, Team};
use crate::infrastructure::matches::{CreateMatchRequest, MatchService};
use crate::infrastructure::team::TeamService;

/// Date format used to prefill the edit form
const FORM_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchesMode {
    #[default]
    Browsing,
    Creating,
    Editing(MatchId),
}

#[derive(Debug)]
pub struct MatchesScreen {
    matches_service: Arc<MatchService>,
    teams_service: Arc<TeamService>,
    mode: MatchesMode,
    matches: Vec<MatchWithTeams>,
    /// Team choices for the form
    teams: Vec<Team>,
}

impl MatchesScreen {
    pub fn new(matches_service: Arc<MatchService>, teams_service: Arc<TeamService>) -> Self {
        Self {
            matches_service,
            teams_service,
            mode: MatchesMode::Browsing,
            matches: Vec::new(),
            teams: Vec::new(),
        }
    }

    pub fn mode(&self) -> &MatchesMode {
        &self.mode
    }

    pub fn matches(&self) -> &[MatchWithTeams] {
        &self.matches
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Load both the match list and the team choices
    pub async fn load(&mut self) -> Result<(), DomainError> {
        self.teams = self.teams_service.list().await?;
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        debug!("Refreshing match list");
        self.matches = self.matches_service.list().await?;
        Ok(())
    }

    /// Open an empty form
    pub fn start_create(&mut self) -> CreateMatchRequest {
        self.mode = MatchesMode::Creating;

        CreateMatchRequest {
            team1_id: String::new(),
            team2_id: String::new(),
            match_date: String::new(),
            location: String::new(),
            status: None,
            team1_score: 0,
            team2_score: 0,
        }
    }

    /// Open the form prefilled from a listed match
    pub fn start_edit(&mut self, match_id: &str) -> Result<CreateMatchRequest, DomainError> {
        let listed = self
            .matches
            .iter()
            .find(|m| m.entry.id().as_str() == match_id)
            .ok_or_else(|| DomainError::not_found(format!("Match '{}' not found", match_id)))?;

        let form = prefill(&listed.entry);
        self.mode = MatchesMode::Editing(listed.entry.id().clone());
        Ok(form)
    }

    /// Close the form without saving
    pub fn cancel(&mut self) {
        self.mode = MatchesMode::Browsing;
    }

    /// Create or update depending on the open form, then close it and refresh
    pub async fn submit(&mut self, request: CreateMatchRequest) -> Result<Match, DomainError> {
        let saved = match &self.mode {
            MatchesMode::Browsing => {
                return Err(DomainError::validation("No match form is open"));
            }
            MatchesMode::Creating => self.matches_service.create(request).await?,
            MatchesMode::Editing(id) => self.matches_service.update(id.as_str(), request).await?,
        };

        self.mode = MatchesMode::Browsing;
        self.refresh().await?;
        Ok(saved)
    }

    pub async fn delete(&mut self, match_id: &str) -> Result<bool, DomainError> {
        let deleted = self.matches_service.delete(match_id).await?;
        self.refresh().await?;
        Ok(deleted)
    }
}

fn prefill(entry: &Match) -> CreateMatchRequest {
    CreateMatchRequest {
        team1_id: entry.team1_id().to_string(),
        team2_id: entry.team2_id().to_string(),
        match_date: entry.match_date().format(FORM_DATE_FORMAT).to_string(),
        location: entry.location().to_string(),
        status: Some(entry.status().to_string()),
        team1_score: i64::from(entry.team1_score()),
        team2_score: i64::from(entry.team2_score()),
    }
}
