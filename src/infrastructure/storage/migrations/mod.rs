//! Database migrations for the `teams` and `matches` tables

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// PostgreSQL migrator tracking applied versions in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::gateway(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to check migration status: {}", e)))
    }

    /// Runs a single migration; returns false if it was already applied
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(false);
        }

        sqlx::raw_sql(migration.up)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::gateway(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::gateway(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        info!(version = migration.version, description = migration.description, "Applied migration");
        Ok(true)
    }

    /// Reverts a single migration; returns false if it was not applied
    pub async fn revert_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if !self.is_applied(migration.version).await? {
            return Ok(false);
        }

        sqlx::raw_sql(migration.down)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::gateway(format!(
                    "Failed to revert migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::gateway(format!(
                    "Failed to remove migration record {}: {}",
                    migration.version, e
                ))
            })?;

        info!(version = migration.version, "Reverted migration");
        Ok(true)
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to get migration version: {}", e)))
    }
}

/// Represents a database migration
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

/// Schema migrations, ascending by version
///
/// `matches` has no foreign keys into `teams`: deleting a team leaves its
/// matches in place with a dangling reference.
pub fn storage_migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            description: "Create teams table",
            up: r#"
            CREATE TABLE IF NOT EXISTS teams (
                id VARCHAR(50) PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                description TEXT NOT NULL,
                max_members INTEGER NOT NULL CHECK (max_members BETWEEN 1 AND 20),
                current_members INTEGER NOT NULL DEFAULT 0
                    CHECK (current_members >= 0 AND current_members <= max_members),
                logo_url TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE INDEX IF NOT EXISTS idx_teams_created_at ON teams(created_at DESC);
            "#,
            down: "DROP TABLE IF EXISTS teams;",
        },
        Migration {
            version: 2,
            description: "Create matches table",
            up: r#"
            CREATE TABLE IF NOT EXISTS matches (
                id VARCHAR(50) PRIMARY KEY,
                team1_id VARCHAR(50) NOT NULL,
                team2_id VARCHAR(50) NOT NULL,
                match_date TIMESTAMPTZ NOT NULL,
                location TEXT NOT NULL,
                status VARCHAR(20) NOT NULL DEFAULT 'scheduled'
                    CHECK (status IN ('scheduled', 'ongoing', 'completed')),
                team1_score INTEGER NOT NULL DEFAULT 0 CHECK (team1_score >= 0),
                team2_score INTEGER NOT NULL DEFAULT 0 CHECK (team2_score >= 0),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            CREATE INDEX IF NOT EXISTS idx_matches_match_date ON matches(match_date DESC);
            "#,
            down: "DROP TABLE IF EXISTS matches;",
        },
    ]
}

/// Apply every pending migration, returns how many ran
pub async fn run_storage_migrations(pool: &PgPool) -> Result<usize, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in storage_migrations() {
        if migrator.run_migration(&migration).await? {
            applied += 1;
        }
    }

    Ok(applied)
}
