//! Warpline
//!
//! Command-line front end for the local account and the endpoint catalog.
//! Logs go to stderr, command output to stdout as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use warpline_core::config::{Config, load_config};
use warpline_core::db::PoolSettings;
use warpline_core::tracing_init::init_tracing;
use warpline_crypto::OsKeyPairGenerator;
use warpline_daemon::account::AccountProvisioner;
use warpline_daemon::clock::now_iso8601;
use warpline_daemon::endpoints::{EndpointSelector, QualityThresholds};
use warpline_daemon::registration::CloudflareClient;
use warpline_daemon::storage::{AccountUpdate, WarplineDatabase};

#[derive(Parser, Debug)]
#[command(name = "warpline")]
#[command(version, about = "Local WARP account provisioning and endpoint selection")]
struct Cli {
    /// Extra config file layered over the global settings.
    #[arg(long, global = true, env = "WARPLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Path to SQLite database file.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect or update the local account.
    Account {
        #[command(subcommand)]
        action: AccountCommand,
    },
    /// List endpoints within the quality thresholds.
    Endpoints {
        /// Maximum packet loss in percent (default from config).
        #[arg(long)]
        max_loss: Option<f64>,

        /// Maximum delay in milliseconds (default from config).
        #[arg(long)]
        max_delay: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    /// Print the current account, registering one if none exists.
    Show {
        /// Include the private key and token in the output.
        #[arg(long)]
        reveal: bool,
    },
    /// Overwrite the mutable fields of the current account.
    Update {
        #[arg(long)]
        license_key: String,

        #[arg(long)]
        premium_data: i64,

        #[arg(long)]
        quota: u32,

        #[arg(long)]
        usage: u32,

        /// ISO-8601 timestamp (defaults to now).
        #[arg(long)]
        updated_at: Option<String>,
    },
}

#[derive(Serialize)]
struct UpdateOutcome<'a> {
    account_id: &'a str,
    rows_affected: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = &cli.db_path {
        config.database.path = Some(path.clone());
    }

    let level = &config.log_level;
    init_tracing(
        &format!("warpline_daemon={level},warpline_core={level}"),
        cli.log_json,
    );
    info!(version = env!("CARGO_PKG_VERSION"), "Starting warpline");

    let db = open_database(&config).await?;

    match cli.command {
        Command::Account { action } => run_account(action, &config, db).await,
        Command::Endpoints {
            max_loss,
            max_delay,
        } => {
            let defaults = QualityThresholds::from(&config.endpoints);
            let thresholds = QualityThresholds {
                max_loss: max_loss.unwrap_or(defaults.max_loss),
                max_delay: max_delay.unwrap_or(defaults.max_delay),
            };
            let endpoints = EndpointSelector::new(db)
                .list_qualifying_endpoints(thresholds)
                .await?;
            print_json(&endpoints)
        }
    }
}

async fn run_account(
    action: AccountCommand,
    config: &Config,
    db: WarplineDatabase,
) -> anyhow::Result<()> {
    let client = CloudflareClient::new(&config.registration)?;
    let provisioner = AccountProvisioner::new(db, OsKeyPairGenerator, client);
    let account = provisioner.get_or_create_current_account().await?;

    match action {
        AccountCommand::Show { reveal } => {
            let mut value = serde_json::to_value(&account)?;
            if !reveal {
                value["private_key"] = "[REDACTED]".into();
                value["token"] = "[REDACTED]".into();
            }
            print_json(&value)
        }
        AccountCommand::Update {
            license_key,
            premium_data,
            quota,
            usage,
            updated_at,
        } => {
            let update = AccountUpdate {
                account_id: account.account_id,
                license_key,
                premium_data,
                quota: i64::from(quota),
                usage: i64::from(usage),
                updated_at: updated_at.unwrap_or_else(now_iso8601),
            };
            let rows_affected = provisioner.save_account(&update).await?;
            print_json(&UpdateOutcome {
                account_id: &update.account_id,
                rows_affected,
            })
        }
    }
}

async fn open_database(config: &Config) -> anyhow::Result<WarplineDatabase> {
    let path = config
        .resolved_database_path()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine database path"))?;
    info!(path = %path.display(), "Opening warpline database");
    let settings = PoolSettings::from(&config.database);
    Ok(WarplineDatabase::open_with(&path, settings).await?)
}

#[allow(clippy::print_stdout)]
fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
