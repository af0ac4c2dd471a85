//! PostgreSQL match repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::matches::{Match, MatchId, MatchRecord, MatchRepository, MatchWithTeams, TeamSummary};
use crate::domain::team::TeamId;
use crate::domain::DomainError;
use crate::infrastructure::storage::int_column;

const MATCH_COLUMNS: &str = "id, team1_id, team2_id, match_date, location, status, \
                             team1_score, team2_score, created_at, updated_at";

/// PostgreSQL implementation of MatchRepository
#[derive(Debug, Clone)]
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    async fn list_with_teams(&self) -> Result<Vec<MatchWithTeams>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.team1_id, m.team2_id, m.match_date, m.location, m.status,
                   m.team1_score, m.team2_score, m.created_at, m.updated_at,
                   t1.name AS team1_name, t1.logo_url AS team1_logo_url,
                   t2.name AS team2_name, t2.logo_url AS team2_logo_url
            FROM matches m
            LEFT JOIN teams t1 ON t1.id = m.team1_id
            LEFT JOIN teams t2 ON t2.id = m.team2_id
            ORDER BY m.match_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::gateway(format!("Failed to list matches: {}", e)))?;

        rows.iter()
            .map(|row| {
                let entry = row_to_match(row)?;

                Ok(MatchWithTeams {
                    team1: summary(row, entry.team1_id(), "team1_name", "team1_logo_url"),
                    team2: summary(row, entry.team2_id(), "team2_name", "team2_logo_url"),
                    entry,
                })
            })
            .collect()
    }

    async fn get(&self, id: &MatchId) -> Result<Option<Match>, DomainError> {
        let query = format!("SELECT {} FROM matches WHERE id = $1", MATCH_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to get match: {}", e)))?;

        row.as_ref().map(row_to_match).transpose()
    }

    async fn insert(&self, entry: Match) -> Result<Match, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO matches (id, team1_id, team2_id, match_date, location, status,
                                 team1_score, team2_score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id().as_str())
        .bind(entry.team1_id().as_str())
        .bind(entry.team2_id().as_str())
        .bind(entry.match_date())
        .bind(entry.location())
        .bind(entry.status().as_str())
        .bind(int_column("team1_score", entry.team1_score())?)
        .bind(int_column("team2_score", entry.team2_score())?)
        .bind(entry.created_at())
        .bind(entry.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("duplicate key") {
                DomainError::conflict(format!("Match '{}' already exists", entry.id()))
            } else {
                DomainError::gateway(format!("Failed to create match: {}", e))
            }
        })?;

        Ok(entry)
    }

    async fn update(&self, entry: &Match) -> Result<Match, DomainError> {
        let query = format!(
            r#"
            UPDATE matches
            SET team1_id = $2, team2_id = $3, match_date = $4, location = $5, status = $6,
                team1_score = $7, team2_score = $8, updated_at = $9
            WHERE id = $1
            RETURNING {}
            "#,
            MATCH_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(entry.id().as_str())
            .bind(entry.team1_id().as_str())
            .bind(entry.team2_id().as_str())
            .bind(entry.match_date())
            .bind(entry.location())
            .bind(entry.status().as_str())
            .bind(int_column("team1_score", entry.team1_score())?)
            .bind(int_column("team2_score", entry.team2_score())?)
            .bind(entry.updated_at())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to update match: {}", e)))?;

        match row {
            Some(row) => row_to_match(&row),
            None => Err(DomainError::not_found(format!(
                "Match '{}' not found",
                entry.id()
            ))),
        }
    }

    async fn delete(&self, id: &MatchId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to delete match: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_match(row: &sqlx::postgres::PgRow) -> Result<Match, DomainError> {
    let team1_score: i32 = row.get("team1_score");
    let team2_score: i32 = row.get("team2_score");
    let match_date: DateTime<Utc> = row.get("match_date");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");

    let record = MatchRecord {
        id: row.get("id"),
        team1_id: row.get("team1_id"),
        team2_id: row.get("team2_id"),
        match_date,
        location: row.get("location"),
        status: row.get("status"),
        team1_score: i64::from(team1_score),
        team2_score: i64::from(team2_score),
        created_at,
        updated_at,
    };

    Match::try_from(record)
        .map_err(|e| DomainError::gateway(format!("Invalid match row in database: {}", e)))
}

/// Left-joined team columns are NULL when the team no longer exists
fn summary(
    row: &sqlx::postgres::PgRow,
    team_id: &TeamId,
    name_column: &str,
    logo_column: &str,
) -> Option<TeamSummary> {
    let name: Option<String> = row.get(name_column);

    name.map(|name| TeamSummary {
        id: team_id.clone(),
        name,
        logo_url: row.get(logo_column),
    })
}
