//! Match service - the match ledger

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::matches::{
    Match, MatchId, MatchInput, MatchRepository, MatchStatus, MatchValidationError, MatchWithTeams,
    StatusPolicy, parse_match_date, validate_score,
};
use crate::domain::team::{TeamId, TeamRepository};
use crate::domain::DomainError;

/// Request for creating a match
#[derive(Debug, Clone)]
pub struct CreateMatchRequest {
    pub team1_id: String,
    pub team2_id: String,
    pub match_date: String,
    pub location: String,
    /// Defaults to `scheduled`
    pub status: Option<String>,
    pub team1_score: i64,
    pub team2_score: i64,
}

/// Request for replacing every field of a match
pub type UpdateMatchRequest = CreateMatchRequest;

/// Match ledger: schedule, list, score and delete matches
#[derive(Debug)]
pub struct MatchService<
    M: MatchRepository + ?Sized = dyn MatchRepository,
    T: TeamRepository + ?Sized = dyn TeamRepository,
> {
    matches: Arc<M>,
    teams: Arc<T>,
    policy: StatusPolicy,
}

impl<M: MatchRepository + ?Sized, T: TeamRepository + ?Sized> MatchService<M, T> {
    /// Create a new match service with the default (unrestricted) status policy
    pub fn new(matches: Arc<M>, teams: Arc<T>) -> Self {
        Self {
            matches,
            teams,
            policy: StatusPolicy::default(),
        }
    }

    /// Set the status transition policy (builder pattern)
    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// List all matches, latest match date first, with team summaries
    pub async fn list(&self) -> Result<Vec<MatchWithTeams>, DomainError> {
        debug!("Listing matches");
        self.matches.list_with_teams().await
    }

    /// Get a match by ID
    pub async fn get(&self, id: &str) -> Result<Option<Match>, DomainError> {
        let match_id = parse_match_id(id)?;
        self.matches.get(&match_id).await
    }

    /// Create a match between two existing teams
    pub async fn create(&self, request: CreateMatchRequest) -> Result<Match, DomainError> {
        info!(
            team1_id = %request.team1_id,
            team2_id = %request.team2_id,
            "Creating match"
        );

        let input = build_input(request)?;
        let entry = Match::new(input).map_err(|e| DomainError::validation(e.to_string()))?;

        self.require_team(entry.team1_id()).await?;
        self.require_team(entry.team2_id()).await?;

        self.matches.insert(entry).await
    }

    /// Replace every field of a match
    ///
    /// Team references are only re-checked when they change, so a match whose
    /// team has since been deleted can still be scored.
    pub async fn update(&self, id: &str, request: UpdateMatchRequest) -> Result<Match, DomainError> {
        info!(id = %id, status = ?request.status, "Updating match");

        let match_id = parse_match_id(id)?;
        let input = build_input(request)?;

        let mut entry = self
            .matches
            .get(&match_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Match '{}' not found", id)))?;

        if &input.team1_id != entry.team1_id() {
            self.require_team(&input.team1_id).await?;
        }

        if &input.team2_id != entry.team2_id() {
            self.require_team(&input.team2_id).await?;
        }

        entry
            .apply(input, self.policy)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.matches.update(&entry).await
    }

    /// Delete a match
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting match");

        let match_id = parse_match_id(id)?;
        self.matches.delete(&match_id).await
    }

    async fn require_team(&self, id: &TeamId) -> Result<(), DomainError> {
        if self.teams.exists(id).await? {
            Ok(())
        } else {
            Err(DomainError::validation(format!("Team '{}' does not exist", id)))
        }
    }
}

fn parse_match_id(id: &str) -> Result<MatchId, DomainError> {
    MatchId::new(id).map_err(|e| DomainError::validation(e.to_string()))
}

fn parse_team_ref(field: &'static str, value: &str) -> Result<TeamId, DomainError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(DomainError::validation(
            MatchValidationError::MissingTeam(field).to_string(),
        ));
    }

    TeamId::new(value).map_err(|e| DomainError::validation(e.to_string()))
}

fn build_input(request: CreateMatchRequest) -> Result<MatchInput, DomainError> {
    let status = match request.status.as_deref().map(str::trim) {
        None | Some("") => MatchStatus::default(),
        Some(status) => status
            .parse()
            .map_err(|e: MatchValidationError| DomainError::validation(e.to_string()))?,
    };

    Ok(MatchInput {
        team1_id: parse_team_ref("Team 1", &request.team1_id)?,
        team2_id: parse_team_ref("Team 2", &request.team2_id)?,
        match_date: parse_match_date(&request.match_date)
            .map_err(|e| DomainError::validation(e.to_string()))?,
        location: request.location,
        status,
        team1_score: validate_score("team1_score", request.team1_score)
            .map_err(|e| DomainError::validation(e.to_string()))?,
        team2_score: validate_score("team2_score", request.team2_score)
            .map_err(|e| DomainError::validation(e.to_string()))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matches::MockMatchRepository;
    use crate::domain::team::{MockTeamRepository, Team};
    use crate::domain::ErrorKind;
    use crate::infrastructure::matches::InMemoryMatchRepository;
    use crate::infrastructure::team::InMemoryTeamRepository;

    struct Fixture {
        teams: Arc<InMemoryTeamRepository>,
        service: MatchService<InMemoryMatchRepository, InMemoryTeamRepository>,
        alpha: Team,
        bravo: Team,
    }

    async fn fixture(policy: StatusPolicy) -> Fixture {
        let teams = Arc::new(InMemoryTeamRepository::new());
        let alpha = teams.insert(Team::new("Alpha", "desc", 5).unwrap()).await.unwrap();
        let bravo = teams.insert(Team::new("Bravo", "desc", 5).unwrap()).await.unwrap();

        let matches = Arc::new(InMemoryMatchRepository::new(Arc::clone(&teams)));
        let service = MatchService::new(matches, Arc::clone(&teams)).with_policy(policy);

        Fixture {
            teams,
            service,
            alpha,
            bravo,
        }
    }

    fn request(team1: &Team, team2: &Team) -> CreateMatchRequest {
        CreateMatchRequest {
            team1_id: team1.id().to_string(),
            team2_id: team2.id().to_string(),
            match_date: "2025-03-14T19:00".to_string(),
            location: "Main Stage".to_string(),
            status: None,
            team1_score: 0,
            team2_score: 0,
        }
    }

    #[tokio::test]
    async fn test_create_match_defaults() {
        let f = fixture(StatusPolicy::Unrestricted).await;

        let entry = f.service.create(request(&f.alpha, &f.bravo)).await.unwrap();

        assert_eq!(entry.status(), MatchStatus::Scheduled);
        assert_eq!((entry.team1_score(), entry.team2_score()), (0, 0));
        assert_eq!(entry.match_date().to_rfc3339(), "2025-03-14T19:00:00+00:00");

        let fetched = f.service.get(entry.id().as_str()).await.unwrap();
        assert_eq!(fetched, Some(entry));
    }

    #[tokio::test]
    async fn test_list_shows_both_team_names() {
        let f = fixture(StatusPolicy::Unrestricted).await;
        f.service.create(request(&f.alpha, &f.bravo)).await.unwrap();

        let listed = f.service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].team1.as_ref().map(|t| t.name.as_str()), Some("Alpha"));
        assert_eq!(listed[0].team2.as_ref().map(|t| t.name.as_str()), Some("Bravo"));
    }

    #[tokio::test]
    async fn test_deleting_team_leaves_match_dangling() {
        let f = fixture(StatusPolicy::Unrestricted).await;
        let entry = f.service.create(request(&f.alpha, &f.bravo)).await.unwrap();

        f.teams.delete(f.alpha.id()).await.unwrap();

        let listed = f.service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].entry.team1_id(), f.alpha.id());
        assert!(listed[0].team1.is_none());
        assert!(listed[0].team2.is_some());

        // Scores on the orphaned match can still be edited
        let mut update = request(&f.alpha, &f.bravo);
        update.team1_score = 1;
        update.status = Some("completed".to_string());
        let updated = f.service.update(entry.id().as_str(), update).await.unwrap();
        assert_eq!(updated.team1_score(), 1);
    }

    #[tokio::test]
    async fn test_negative_score_is_rejected() {
        let f = fixture(StatusPolicy::Unrestricted).await;

        let mut bad = request(&f.alpha, &f.bravo);
        bad.team2_score = -1;
        let err = f.service.create(bad.clone()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let entry = f.service.create(request(&f.alpha, &f.bravo)).await.unwrap();
        let err = f.service.update(entry.id().as_str(), bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let stored = f.service.get(entry.id().as_str()).await.unwrap().unwrap();
        assert_eq!(stored.team2_score(), 0);
    }

    #[tokio::test]
    async fn test_oversized_score_is_rejected() {
        let f = fixture(StatusPolicy::Unrestricted).await;

        let mut huge = request(&f.alpha, &f.bravo);
        huge.team1_score = 3_000_000_000;
        let err = f.service.create(huge.clone()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(f.service.list().await.unwrap().is_empty());

        let entry = f.service.create(request(&f.alpha, &f.bravo)).await.unwrap();
        let err = f.service.update(entry.id().as_str(), huge).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let f = fixture(StatusPolicy::Unrestricted).await;

        let mut missing_team = request(&f.alpha, &f.bravo);
        missing_team.team2_id = "  ".to_string();

        let same_team = request(&f.alpha, &f.alpha);

        let mut no_location = request(&f.alpha, &f.bravo);
        no_location.location = " ".to_string();

        let mut bad_date = request(&f.alpha, &f.bravo);
        bad_date.match_date = "next friday".to_string();

        let mut bad_status = request(&f.alpha, &f.bravo);
        bad_status.status = Some("postponed".to_string());

        let mut unknown_team = request(&f.alpha, &f.bravo);
        unknown_team.team2_id = "ghost".to_string();

        for bad in [
            missing_team,
            same_team,
            no_location,
            bad_date,
            bad_status,
            unknown_team,
        ] {
            let err = f.service.create(bad).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{}", err);
        }

        assert!(f.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let f = fixture(StatusPolicy::Unrestricted).await;
        let charlie = f
            .teams
            .insert(Team::new("Charlie", "desc", 5).unwrap())
            .await
            .unwrap();
        let entry = f.service.create(request(&f.alpha, &f.bravo)).await.unwrap();

        let update = CreateMatchRequest {
            team1_id: charlie.id().to_string(),
            team2_id: f.bravo.id().to_string(),
            match_date: "2025-04-01T10:30:00Z".to_string(),
            location: "Online".to_string(),
            status: Some("Ongoing".to_string()),
            team1_score: 2,
            team2_score: 3,
        };

        let updated = f.service.update(entry.id().as_str(), update).await.unwrap();
        assert_eq!(updated.team1_id(), charlie.id());
        assert_eq!(updated.location(), "Online");
        assert_eq!(updated.status(), MatchStatus::Ongoing);
        assert_eq!((updated.team1_score(), updated.team2_score()), (2, 3));
        assert!(updated.updated_at() >= entry.updated_at());
    }

    #[tokio::test]
    async fn test_update_to_missing_team_fails() {
        let f = fixture(StatusPolicy::Unrestricted).await;
        let entry = f.service.create(request(&f.alpha, &f.bravo)).await.unwrap();

        let mut update = request(&f.alpha, &f.bravo);
        update.team2_id = "ghost".to_string();

        let err = f.service.update(entry.id().as_str(), update).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_missing_match() {
        let f = fixture(StatusPolicy::Unrestricted).await;
        let err = f
            .service
            .update("ghost", request(&f.alpha, &f.bravo))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unrestricted_policy_allows_reopening() {
        let f = fixture(StatusPolicy::Unrestricted).await;
        let mut create = request(&f.alpha, &f.bravo);
        create.status = Some("completed".to_string());
        let entry = f.service.create(create).await.unwrap();

        let mut reopen = request(&f.alpha, &f.bravo);
        reopen.status = Some("scheduled".to_string());
        let updated = f.service.update(entry.id().as_str(), reopen).await.unwrap();

        assert_eq!(updated.status(), MatchStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_completed_to_scheduled() {
        let f = fixture(StatusPolicy::Strict).await;
        let mut create = request(&f.alpha, &f.bravo);
        create.status = Some("completed".to_string());
        let entry = f.service.create(create).await.unwrap();

        let mut reopen = request(&f.alpha, &f.bravo);
        reopen.status = Some("scheduled".to_string());
        let err = f.service.update(entry.id().as_str(), reopen).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        let stored = f.service.get(entry.id().as_str()).await.unwrap().unwrap();
        assert_eq!(stored.status(), MatchStatus::Completed);
    }

    #[tokio::test]
    async fn test_delete_match() {
        let f = fixture(StatusPolicy::Unrestricted).await;
        let entry = f.service.create(request(&f.alpha, &f.bravo)).await.unwrap();

        assert!(f.service.delete(entry.id().as_str()).await.unwrap());
        assert!(f.service.get(entry.id().as_str()).await.unwrap().is_none());
        assert!(!f.service.delete(entry.id().as_str()).await.unwrap());
    }

    #[tokio::test]
    async fn test_gateway_failure_on_insert() {
        let mut teams = MockTeamRepository::new();
        teams.expect_exists().returning(|_| Ok(true));

        let mut matches = MockMatchRepository::new();
        matches
            .expect_insert()
            .times(1)
            .returning(|_| Err(DomainError::gateway("timeout")));

        let service = MatchService::new(Arc::new(matches), Arc::new(teams));
        let err = service
            .create(CreateMatchRequest {
                team1_id: "alpha".to_string(),
                team2_id: "bravo".to_string(),
                match_date: "2025-03-14T19:00:00Z".to_string(),
                location: "Main Stage".to_string(),
                status: None,
                team1_score: 0,
                team2_score: 0,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Gateway);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_gateway() {
        let mut teams = MockTeamRepository::new();
        teams.expect_exists().never();

        let mut matches = MockMatchRepository::new();
        matches.expect_insert().never();

        let service = MatchService::new(Arc::new(matches), Arc::new(teams));
        let err = service
            .create(CreateMatchRequest {
                team1_id: "alpha".to_string(),
                team2_id: "bravo".to_string(),
                match_date: "2025-03-14T19:00:00Z".to_string(),
                location: "Main Stage".to_string(),
                status: None,
                team1_score: -3,
                team2_score: 0,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
