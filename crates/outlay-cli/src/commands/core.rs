//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `resolve_db_path` - shared database access
//! - `parse_day` - YYYY-MM-DD to epoch millis
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use outlay_core::db::Database;
use outlay_core::export::format_day;
use tracing::debug;

/// Resolve the database path: the --db flag if given, otherwise
/// `<data dir>/outlay/outlay.db`.
pub fn resolve_db_path(db: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = db {
        return Ok(path.to_path_buf());
    }
    let base = dirs::data_dir().context("No platform data directory available; pass --db")?;
    let dir = base.join("outlay");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    Ok(dir.join("outlay.db"))
}

/// Open the database, creating it if needed.
pub fn open_db(db: Option<&Path>) -> Result<Database> {
    let path = resolve_db_path(db)?;
    let path_str = path.to_str().context("Database path is not valid UTF-8")?;
    debug!(path = %path.display(), "opening database");
    Database::new(path_str).context("Failed to open database")
}

/// Parse an optional YYYY-MM-DD day into UTC epoch millis; defaults to now.
pub fn parse_day(day: Option<&str>) -> Result<i64> {
    match day {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .context("Invalid date format (use YYYY-MM-DD)")?;
            Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis())
        }
        None => Ok(Utc::now().timestamp_millis()),
    }
}

pub fn cmd_init(db: Option<&Path>) -> Result<()> {
    let path = resolve_db_path(db)?;
    println!("🔧 Initializing database at {}...", path.display());

    open_db(db)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: outlay add --title Lunch --amount 12.50 --category Food");
    println!("  2. View today's report: outlay report");

    Ok(())
}

pub fn cmd_status(db: &Database) -> Result<()> {
    let count = db.count_expenses()?;
    let span = db.date_span()?;

    println!();
    println!("📁 Database: {}", db.path());
    println!("   Expenses: {}", count);
    match span {
        Some((first, last)) => {
            println!("   First day: {}", format_day(outlay_core::day_start(first)));
            println!("   Last day:  {}", format_day(outlay_core::day_start(last)));
        }
        None => println!("   No records yet."),
    }

    Ok(())
}
