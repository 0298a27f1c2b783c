//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Outlay - Daily expense log with live summaries
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Record daily expenses and view rolling summaries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// Short description of the expense
        #[arg(short, long)]
        title: String,

        /// Amount spent (positive, stored with two decimals)
        #[arg(short, long)]
        amount: f64,

        /// Category name (exact string groups report rows)
        #[arg(short, long)]
        category: String,

        /// Optional note, at most 100 characters
        #[arg(short, long)]
        notes: Option<String>,

        /// Day the expense belongs to (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Opaque reference to an attached receipt
        #[arg(long)]
        attachment: Option<String>,
    },

    /// List expenses for a day
    List {
        /// Day to list (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a day's total, category breakdown and 7-day rolling series
    Report {
        /// Anchor day (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the report as CSV or JSON
    Export {
        /// Anchor day (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show database status
    Status,
}
