//! Match entity and read models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::{MatchStatus, StatusPolicy};
use super::validation::{MatchValidationError, validate_location, validate_match_id, validate_score};
use crate::domain::team::{Team, TeamId};

/// Match identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Result<Self, MatchValidationError> {
        let id = id.into();
        validate_match_id(&id)?;
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MatchId {
    type Error = MatchValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MatchId> for String {
    fn from(id: MatchId) -> Self {
        id.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated field values for creating or replacing a match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchInput {
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub match_date: DateTime<Utc>,
    pub location: String,
    pub status: MatchStatus,
    pub team1_score: u32,
    pub team2_score: u32,
}

impl MatchInput {
    fn validate(&self) -> Result<(), MatchValidationError> {
        if self.team1_id == self.team2_id {
            return Err(MatchValidationError::SameTeam);
        }

        validate_location(&self.location)
    }
}

/// Match entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    id: MatchId,
    team1_id: TeamId,
    team2_id: TeamId,
    match_date: DateTime<Utc>,
    location: String,
    status: MatchStatus,
    team1_score: u32,
    team2_score: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Raw match columns as read back from the data gateway
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub id: String,
    pub team1_id: String,
    pub team2_id: String,
    pub match_date: DateTime<Utc>,
    pub location: String,
    pub status: String,
    pub team1_score: i64,
    pub team2_score: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Create a new match with a generated ID
    pub fn new(input: MatchInput) -> Result<Self, MatchValidationError> {
        input.validate()?;
        let now = Utc::now();

        Ok(Self {
            id: MatchId::generate(),
            team1_id: input.team1_id,
            team2_id: input.team2_id,
            match_date: input.match_date,
            location: input.location,
            status: input.status,
            team1_score: input.team1_score,
            team2_score: input.team2_score,
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &MatchId {
        &self.id
    }

    pub fn team1_id(&self) -> &TeamId {
        &self.team1_id
    }

    pub fn team2_id(&self) -> &TeamId {
        &self.team2_id
    }

    pub fn match_date(&self) -> DateTime<Utc> {
        self.match_date
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn team1_score(&self) -> u32 {
        self.team1_score
    }

    pub fn team2_score(&self) -> u32 {
        self.team2_score
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Replace every editable field
    pub fn apply(
        &mut self,
        input: MatchInput,
        policy: StatusPolicy,
    ) -> Result<(), MatchValidationError> {
        input.validate()?;

        if !policy.permits(self.status, input.status) {
            return Err(MatchValidationError::StatusTransition {
                from: self.status,
                to: input.status,
            });
        }

        self.team1_id = input.team1_id;
        self.team2_id = input.team2_id;
        self.match_date = input.match_date;
        self.location = input.location;
        self.status = input.status;
        self.team1_score = input.team1_score;
        self.team2_score = input.team2_score;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Record-level failures while restoring a match
#[derive(Debug, thiserror::Error)]
pub enum MatchRecordError {
    #[error(transparent)]
    Match(#[from] MatchValidationError),

    #[error(transparent)]
    Team(#[from] crate::domain::team::TeamValidationError),
}

impl TryFrom<MatchRecord> for Match {
    type Error = MatchRecordError;

    fn try_from(record: MatchRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MatchId::new(record.id)?,
            team1_id: TeamId::new(record.team1_id)?,
            team2_id: TeamId::new(record.team2_id)?,
            match_date: record.match_date,
            location: record.location,
            status: record.status.parse()?,
            team1_score: validate_score("team1_score", record.team1_score)?,
            team2_score: validate_score("team2_score", record.team2_score)?,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Denormalized team fields attached to a listed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().clone(),
            name: team.name().to_string(),
            logo_url: team.logo_url().map(String::from),
        }
    }
}

/// A match joined with both sides' team summaries
///
/// A side is `None` when its team has been deleted since the match was
/// created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWithTeams {
    #[serde(flatten)]
    pub entry: Match,
    pub team1: Option<TeamSummary>,
    pub team2: Option<TeamSummary>,
}

impl MatchWithTeams {
    /// True when either side points at a team that no longer exists
    pub fn has_dangling_team(&self) -> bool {
        self.team1.is_none() || self.team2.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input(team1: &str, team2: &str, status: MatchStatus) -> MatchInput {
        MatchInput {
            team1_id: TeamId::new(team1).unwrap(),
            team2_id: TeamId::new(team2).unwrap(),
            match_date: Utc.with_ymd_and_hms(2025, 3, 14, 19, 0, 0).unwrap(),
            location: "Main Stage".to_string(),
            status,
            team1_score: 0,
            team2_score: 0,
        }
    }

    #[test]
    fn test_match_creation() {
        let m = Match::new(input("alpha", "bravo", MatchStatus::Scheduled)).unwrap();

        assert_eq!(m.team1_id().as_str(), "alpha");
        assert_eq!(m.team2_id().as_str(), "bravo");
        assert_eq!(m.status(), MatchStatus::Scheduled);
        assert_eq!((m.team1_score(), m.team2_score()), (0, 0));
    }

    #[test]
    fn test_match_rejects_same_team() {
        let result = Match::new(input("alpha", "alpha", MatchStatus::Scheduled));
        assert_eq!(result.unwrap_err(), MatchValidationError::SameTeam);
    }

    #[test]
    fn test_match_rejects_empty_location() {
        let mut bad = input("alpha", "bravo", MatchStatus::Scheduled);
        bad.location = String::new();
        assert_eq!(Match::new(bad).unwrap_err(), MatchValidationError::EmptyLocation);
    }

    #[test]
    fn test_apply_unrestricted_allows_any_status() {
        let mut m = Match::new(input("alpha", "bravo", MatchStatus::Completed)).unwrap();

        m.apply(input("alpha", "bravo", MatchStatus::Scheduled), StatusPolicy::Unrestricted)
            .unwrap();
        assert_eq!(m.status(), MatchStatus::Scheduled);
    }

    #[test]
    fn test_apply_strict_rejects_backwards() {
        let mut m = Match::new(input("alpha", "bravo", MatchStatus::Completed)).unwrap();

        let result = m.apply(input("alpha", "bravo", MatchStatus::Ongoing), StatusPolicy::Strict);
        assert_eq!(
            result,
            Err(MatchValidationError::StatusTransition {
                from: MatchStatus::Completed,
                to: MatchStatus::Ongoing
            })
        );
        assert_eq!(m.status(), MatchStatus::Completed);
    }

    #[test]
    fn test_apply_replaces_fields() {
        let mut m = Match::new(input("alpha", "bravo", MatchStatus::Scheduled)).unwrap();
        let mut next = input("alpha", "charlie", MatchStatus::Ongoing);
        next.team1_score = 2;
        next.team2_score = 1;
        next.location = "Online".to_string();

        m.apply(next, StatusPolicy::Strict).unwrap();

        assert_eq!(m.team2_id().as_str(), "charlie");
        assert_eq!(m.location(), "Online");
        assert_eq!((m.team1_score(), m.team2_score()), (2, 1));
    }

    #[test]
    fn test_from_record_rejects_negative_score() {
        let now = Utc::now();
        let record = MatchRecord {
            id: "m-1".to_string(),
            team1_id: "alpha".to_string(),
            team2_id: "bravo".to_string(),
            match_date: now,
            location: "Main Stage".to_string(),
            status: "ongoing".to_string(),
            team1_score: -4,
            team2_score: 0,
            created_at: now,
            updated_at: now,
        };

        assert!(Match::try_from(record.clone()).is_err());

        let restored = Match::try_from(MatchRecord {
            team1_score: 4,
            ..record
        })
        .unwrap();
        assert_eq!(restored.status(), MatchStatus::Ongoing);
        assert_eq!(restored.team1_score(), 4);
    }

    #[test]
    fn test_match_with_teams_serializes_flat() {
        let m = Match::new(input("alpha", "bravo", MatchStatus::Scheduled)).unwrap();
        let listed = MatchWithTeams {
            entry: m,
            team1: Some(TeamSummary {
                id: TeamId::new("alpha").unwrap(),
                name: "Alpha".to_string(),
                logo_url: None,
            }),
            team2: None,
        };

        let json = serde_json::to_value(&listed).unwrap();
        assert_eq!(json["team1_id"], "alpha");
        assert_eq!(json["team1"]["name"], "Alpha");
        assert!(json["team2"].is_null());
        assert!(listed.has_dangling_team());
    }
}
