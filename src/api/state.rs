//! Application state for shared services

use std::sync::Arc;

use crate::domain::StatusPolicy;
use crate::infrastructure::matches::MatchService;
use crate::infrastructure::storage::Gateways;
use crate::infrastructure::team::TeamService;

/// Application state shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub team_service: Arc<TeamService>,
    pub match_service: Arc<MatchService>,
}

impl AppState {
    pub fn new(team_service: Arc<TeamService>, match_service: Arc<MatchService>) -> Self {
        Self {
            team_service,
            match_service,
        }
    }

    /// Wire both services over the same pair of gateways
    pub fn from_gateways(gateways: &Gateways, policy: StatusPolicy) -> Self {
        let team_service = TeamService::new(Arc::clone(&gateways.teams));
        let match_service =
            MatchService::new(Arc::clone(&gateways.matches), Arc::clone(&gateways.teams))
                .with_policy(policy);

        Self::new(Arc::new(team_service), Arc::new(match_service))
    }
}
