//! PostgreSQL team repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::team::{Team, TeamId, TeamRecord, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::int_column;

const TEAM_COLUMNS: &str = "id, name, description, max_members, current_members, logo_url, \
                            created_at, updated_at";

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let query = format!("SELECT {} FROM teams ORDER BY created_at DESC", TEAM_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to list teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let query = format!("SELECT {} FROM teams WHERE id = $1", TEAM_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to get team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn insert(&self, team: Team) -> Result<Team, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, description, max_members, current_members, logo_url,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(team.id().as_str())
        .bind(team.name())
        .bind(team.description())
        .bind(int_column("max_members", team.max_members())?)
        .bind(int_column("current_members", team.current_members())?)
        .bind(team.logo_url())
        .bind(team.created_at())
        .bind(team.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("duplicate key") {
                DomainError::conflict(format!("Team '{}' already exists", team.id()))
            } else {
                DomainError::gateway(format!("Failed to create team: {}", e))
            }
        })?;

        Ok(team)
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        // The membership guard keeps a racing join from ending above the new capacity
        let query = format!(
            r#"
            UPDATE teams
            SET name = $2, description = $3, max_members = $4, logo_url = $5, updated_at = $6
            WHERE id = $1 AND current_members <= $4
            RETURNING {}
            "#,
            TEAM_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(team.id().as_str())
            .bind(team.name())
            .bind(team.description())
            .bind(int_column("max_members", team.max_members())?)
            .bind(team.logo_url())
            .bind(team.updated_at())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to update team: {}", e)))?;

        match row {
            Some(row) => row_to_team(&row),
            None if self.exists(team.id()).await? => Err(DomainError::validation(format!(
                "Max members ({}) cannot be lower than current members of team '{}'",
                team.max_members(),
                team.id()
            ))),
            None => Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.id()
            ))),
        }
    }

    async fn increment_members(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let query = format!(
            r#"
            UPDATE teams
            SET current_members = current_members + 1, updated_at = NOW()
            WHERE id = $1 AND current_members < max_members
            RETURNING {}
            "#,
            TEAM_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to join team: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to delete team: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: &TeamId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teams WHERE id = $1)")
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to check team existence: {}", e)))
    }
}

fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let max_members: i32 = row.get("max_members");
    let current_members: i32 = row.get("current_members");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");

    let record = TeamRecord {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        max_members: i64::from(max_members),
        current_members: i64::from(current_members),
        logo_url: row.get("logo_url"),
        created_at,
        updated_at,
    };

    Team::try_from(record)
        .map_err(|e| DomainError::gateway(format!("Invalid team row in database: {}", e)))
}
