//! # Voucher CLI
//!
//! Command line front end for the voucher catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        voucher <command>                                │
//! │                                                                         │
//! │  AppConfig::load (env) + --db ───► Database::new (pool + migrations)   │
//! │                                          │                              │
//! │                                          ▼                              │
//! │  Ctrl-C ───► CancellationToken ───► commands::run ───► stdout (JSON)   │
//! │                                                                         │
//! │  Logs go to stderr; RUST_LOG overrides the default filter.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Examples
//! ```bash
//! voucher create --code SAVE10 --discount 10 --expiry 2025-12-31
//! voucher list --page 2 --size 5 --search save --order desc
//! voucher import vouchers.csv
//! voucher export --output vouchers.csv
//! ```

mod cli;
mod commands;
mod config;
mod error;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use voucher_db::Database;

use crate::cli::Cli;
use crate::commands::{App, Output};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let config = AppConfig::load()?.with_db_path(cli.db.clone());
    info!(
        path = %config.db_path.display(),
        max_connections = config.max_connections,
        "Configuration loaded"
    );

    let db = open_database(&config).await?;

    let app = App::new(Arc::new(db.vouchers()));

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let result = commands::run(&app, cli.command, &cancel).await;
    db.close().await;

    match result {
        Ok(output) => {
            print_output(output)?;
            Ok(())
        }
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&err)?);
            std::process::exit(err.exit_code());
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=voucher=trace` - Show trace for voucher crates only
/// - Default: INFO, DEBUG for voucher crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,voucher=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the pool, applies migrations and checks the database answers queries.
async fn open_database(config: &AppConfig) -> anyhow::Result<Database> {
    let db = Database::new(config.db_config())
        .await
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;

    if !db.health_check().await {
        db.close().await;
        anyhow::bail!("Database {} is not answering queries", config.db_path.display());
    }

    Ok(db)
}

/// Cancels `cancel` on the first Ctrl-C.
async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            warn!("Interrupt received, cancelling");
            cancel.cancel();
        }
        Err(e) => warn!(error = %e, "Failed to install Ctrl+C handler"),
    }
}

fn print_output(output: Output) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    match output {
        Output::Json(value) => writeln!(stdout, "{}", serde_json::to_string_pretty(&value)?)?,
        Output::Csv(bytes) => stdout.write_all(&bytes)?,
    }
    stdout.flush()?;
    Ok(())
}
