//! Outlay CLI - Daily expense log
//!
//! Usage:
//!   outlay init                              Initialize database
//!   outlay add --title Lunch --amount 12.50 --category Food
//!   outlay report --date 2026-08-06          Day + rolling summary
//!   outlay export --output report.csv        CSV report

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(cli.db.as_deref()),
        Commands::Add {
            title,
            amount,
            category,
            notes,
            date,
            attachment,
        } => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_add(
                &db,
                &title,
                amount,
                &category,
                notes.as_deref(),
                date.as_deref(),
                attachment.as_deref(),
            )
        }
        Commands::List { date, json } => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_list(&db, date.as_deref(), json)
        }
        Commands::Report { date, json } => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_report(&db, date.as_deref(), json).await
        }
        Commands::Export {
            date,
            format,
            output,
        } => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_export(&db, date.as_deref(), &format, output.as_deref()).await
        }
        Commands::Status => {
            let db = commands::open_db(cli.db.as_deref())?;
            commands::cmd_status(&db)
        }
    }
}
