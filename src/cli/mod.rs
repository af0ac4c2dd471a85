//! CLI module for Esports Hub
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `migrate`: apply or revert PostgreSQL schema migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Esports Hub - team registry and match ledger
#[derive(Parser)]
#[command(name = "esports-hub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Manage PostgreSQL schema migrations
    Migrate(migrate::MigrateArgs),
}
