//! Migrate command - applies or reverts the PostgreSQL schema

use anyhow::{bail, Context};
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{
    run_storage_migrations, storage_migrations, PostgresMigrator, StorageConfig,
};

#[derive(Args, Debug, Clone, Default)]
pub struct MigrateArgs {
    /// Revert the latest applied migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,

    /// Database URL (overrides storage.database_url and DATABASE_URL)
    #[arg(long, env = "ESPORTS_HUB_DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    if let Some(url) = args.database_url {
        config.storage.backend = "postgres".to_string();
        config.storage.database_url = Some(url);
    }

    let postgres = match config.storage.resolve() {
        Ok(StorageConfig::Postgres(postgres)) => postgres,
        Ok(StorageConfig::InMemory) => {
            bail!("Migrations need a postgres backend; set storage.backend = \"postgres\"")
        }
        Err(e) => bail!("Invalid storage configuration: {}", e),
    };

    let pool = postgres.connect().await?;
    let migrator = PostgresMigrator::new(pool.clone());

    if args.revert {
        let Some(version) = migrator.current_version().await? else {
            info!("No migrations to revert");
            return Ok(());
        };

        let migration = storage_migrations()
            .into_iter()
            .find(|m| m.version == version);

        match migration {
            Some(migration) => {
                migrator.revert_migration(&migration).await?;
            }
            None => bail!("Applied migration {} is unknown to this build", version),
        }
    } else {
        let applied = run_storage_migrations(&pool).await?;
        info!(applied, "Migrations applied");
    }

    let version = migrator.current_version().await?;
    info!(version = ?version, "Schema version");

    Ok(())
}
