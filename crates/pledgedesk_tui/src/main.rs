//! Pledgedesk backoffice - administrative terminal UI for the platform.

mod actions;
mod app;
mod command;
mod config;
mod event;
mod listing;
mod migrate;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::Term;
use pledgedesk::worker::{DatabaseJobStore, JobQueue};
use tracing_subscriber::EnvFilter;

use crate::app::{App, OrganizationScope};

#[derive(Parser)]
#[command(name = "pledgedesk-backoffice")]
#[command(version)]
#[command(about = "Administrative terminal UI for the Pledgedesk platform")]
#[command(
    long_about = "The backoffice lists the repositories of every claimed organization, with \
structured and fuzzy search, and can open repositories externally, queue \
badge updates, and queue platform re-syncs."
)]
#[command(after_long_help = r#"EXAMPLES
    Browse every repository:
        $ pledgedesk-backoffice

    Browse one organization's repositories:
        $ pledgedesk-backoffice --organization acme

    Search (ctrl+f inside the UI):
        org:acme widgets     repositories named *widgets* under orgs whose slug contains "acme"

CONFIGURATION
    The backoffice reads configuration from:
      1. ~/.config/pledgedesk/config.toml (or $XDG_CONFIG_HOME/pledgedesk/config.toml)
      2. ./pledgedesk.toml
      3. Environment variables (PLEDGEDESK_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    PLEDGEDESK_DATABASE_URL    Database connection string (default: ~/.local/state/pledgedesk/backoffice.db)
"#)]
struct Cli {
    /// Scope the listing to one organization slug
    #[arg(short, long)]
    organization: Option<String>,

    /// Database connection string (overrides config and environment)
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Structured logging only when stdout is not a terminal; interactively
    // the TUI owns the screen.
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("pledgedesk=info,pledgedesk_tui=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();
    let cli = Cli::parse();

    let database_url = cli
        .database_url
        .clone()
        .or_else(|| config.database_url())
        .context("could not determine database URL")?;

    // Ensure the database directory exists for SQLite
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    match cli.command {
        Some(Commands::Migrate { action }) => {
            migrate::handle_migrate(action, &database_url).await?;
        }
        None => {
            run_tui(cli.organization.as_deref(), &config, &database_url).await?;
        }
    }

    Ok(())
}

async fn run_tui(
    organization: Option<&str>,
    config: &config::Config,
    database_url: &str,
) -> anyhow::Result<()> {
    let db = pledgedesk::connect_and_migrate(database_url)
        .await
        .context("failed to connect to the database")?;

    let scope = match organization {
        Some(slug) => {
            let organization = pledgedesk::organization::find_by_slug(&db, slug)
                .await?
                .with_context(|| format!("no organization with slug '{slug}'"))?;
            Some(OrganizationScope {
                id: organization.id,
                slug: organization.slug,
            })
        }
        None => None,
    };

    let queue = Arc::new(JobQueue::new(Arc::new(DatabaseJobStore::new(db.clone()))));
    let app = App::new(db, queue, config.frontend_base_url(), scope);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();
    result
}
