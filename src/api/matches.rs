//! Match ledger endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Match, MatchWithTeams, TeamSummary};
use crate::infrastructure::matches::CreateMatchRequest;

/// Body for creating or replacing a match
#[derive(Debug, Clone, Deserialize)]
pub struct MatchApiRequest {
    pub team1_id: String,
    pub team2_id: String,
    pub match_date: String,
    pub location: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub team1_score: i64,
    #[serde(default)]
    pub team2_score: i64,
}

impl From<MatchApiRequest> for CreateMatchRequest {
    fn from(request: MatchApiRequest) -> Self {
        Self {
            team1_id: request.team1_id,
            team2_id: request.team2_id,
            match_date: request.match_date,
            location: request.location,
            status: request.status,
            team1_score: request.team1_score,
            team2_score: request.team2_score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub id: String,
    pub team1_id: String,
    pub team2_id: String,
    pub match_date: String,
    pub location: String,
    pub status: String,
    pub team1_score: u32,
    pub team2_score: u32,
    /// Only set on list responses; `null` when the team was deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1: Option<Option<TeamSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2: Option<Option<TeamSummary>>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Match> for MatchResponse {
    fn from(entry: &Match) -> Self {
        Self {
            id: entry.id().to_string(),
            team1_id: entry.team1_id().to_string(),
            team2_id: entry.team2_id().to_string(),
            match_date: entry.match_date().to_rfc3339(),
            location: entry.location().to_string(),
            status: entry.status().to_string(),
            team1_score: entry.team1_score(),
            team2_score: entry.team2_score(),
            team1: None,
            team2: None,
            created_at: entry.created_at().to_rfc3339(),
            updated_at: entry.updated_at().to_rfc3339(),
        }
    }
}

impl From<&MatchWithTeams> for MatchResponse {
    fn from(listed: &MatchWithTeams) -> Self {
        Self {
            team1: Some(listed.team1.clone()),
            team2: Some(listed.team2.clone()),
            ..Self::from(&listed.entry)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMatchesResponse {
    pub matches: Vec<MatchResponse>,
    pub total: usize,
}

/// GET /api/matches
pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<ListMatchesResponse>, ApiError> {
    debug!("Listing matches");

    let matches = state.match_service.list().await?;
    let matches: Vec<MatchResponse> = matches.iter().map(MatchResponse::from).collect();
    let total = matches.len();

    Ok(Json(ListMatchesResponse { matches, total }))
}

/// POST /api/matches
pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<MatchApiRequest>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    debug!(team1_id = %request.team1_id, team2_id = %request.team2_id, "Creating match");

    let entry = state.match_service.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(MatchResponse::from(&entry))))
}

/// GET /api/matches/{match_id}
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchResponse>, ApiError> {
    debug!(match_id = %match_id, "Getting match");

    let entry = state
        .match_service
        .get(&match_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Match '{}' not found", match_id)))?;

    Ok(Json(MatchResponse::from(&entry)))
}

/// PUT /api/matches/{match_id}
pub async fn update_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<MatchApiRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    debug!(match_id = %match_id, "Updating match");

    let entry = state.match_service.update(&match_id, request.into()).await?;

    Ok(Json(MatchResponse::from(&entry)))
}

/// DELETE /api/matches/{match_id}
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(match_id = %match_id, "Deleting match");

    if !state.match_service.delete(&match_id).await? {
        return Err(ApiError::not_found(format!("Match '{}' not found", match_id)));
    }

    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": match_id
    })))
}
