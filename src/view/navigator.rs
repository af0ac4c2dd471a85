//! Top-level page navigation

use crate::domain::{DomainError, TeamId};

/// The page currently shown
///
/// Team detail always carries the team it shows, so there is no way to be on
/// that page without a selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Teams,
    TeamDetail(TeamId),
    Matches,
}

#[derive(Debug, Default)]
pub struct Navigator {
    page: Page,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Page {
        &self.page
    }

    /// The team on the detail page, if that page is showing
    pub fn selected_team(&self) -> Option<&TeamId> {
        match &self.page {
            Page::TeamDetail(id) => Some(id),
            _ => None,
        }
    }

    pub fn go_home(&mut self) {
        self.page = Page::Home;
    }

    pub fn go_teams(&mut self) {
        self.page = Page::Teams;
    }

    pub fn go_matches(&mut self) {
        self.page = Page::Matches;
    }

    /// Open the detail page for a team
    pub fn view_team(&mut self, team_id: &str) -> Result<(), DomainError> {
        let id = TeamId::new(team_id).map_err(|e| DomainError::validation(e.to_string()))?;
        self.page = Page::TeamDetail(id);
        Ok(())
    }

    /// Leave the detail page for the team list
    pub fn back_to_teams(&mut self) {
        self.page = Page::Teams;
    }
}
