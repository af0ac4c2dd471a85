//! Team registry endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::Team;
use crate::infrastructure::team::{CreateTeamRequest, UpdateTeamRequest};

/// Body for creating or editing a team
#[derive(Debug, Clone, Deserialize)]
pub struct TeamApiRequest {
    pub name: String,
    pub description: String,
    pub max_members: i64,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub max_members: u32,
    pub current_members: u32,
    pub open_slots: u32,
    pub is_full: bool,
    pub fill_percent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().to_string(),
            name: team.name().to_string(),
            description: team.description().to_string(),
            max_members: team.max_members(),
            current_members: team.current_members(),
            open_slots: team.open_slots(),
            is_full: team.is_full(),
            fill_percent: team.fill_percent(),
            logo_url: team.logo_url().map(String::from),
            created_at: team.created_at().to_rfc3339(),
            updated_at: team.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
    pub total: usize,
}

/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<ListTeamsResponse>, ApiError> {
    debug!("Listing teams");

    let teams = state.team_service.list().await?;
    let teams: Vec<TeamResponse> = teams.iter().map(TeamResponse::from).collect();
    let total = teams.len();

    Ok(Json(ListTeamsResponse { teams, total }))
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<TeamApiRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    debug!(name = %request.name, "Creating team");

    let team = state
        .team_service
        .create(CreateTeamRequest {
            name: request.name,
            description: request.description,
            max_members: request.max_members,
            logo_url: request.logo_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /api/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, "Getting team");

    let team = state
        .team_service
        .get(&team_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))?;

    Ok(Json(TeamResponse::from(&team)))
}

/// PUT /api/teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(request): Json<TeamApiRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, "Updating team");

    let team = state
        .team_service
        .update(
            &team_id,
            UpdateTeamRequest {
                name: request.name,
                description: request.description,
                max_members: request.max_members,
                logo_url: request.logo_url,
            },
        )
        .await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// POST /api/teams/{team_id}/join
pub async fn join_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, "Joining team");

    let team = state.team_service.join(&team_id).await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// DELETE /api/teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(team_id = %team_id, "Deleting team");

    let deleted = state.team_service.delete(&team_id).await?;

    if !deleted {
        return Err(ApiError::not_found(format!("Team '{}' not found", team_id)));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": team_id
    })))
}
