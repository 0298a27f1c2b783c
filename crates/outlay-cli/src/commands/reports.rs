//! Report command implementations
//!
//! `report` and `export` drive the full pipeline: they build a controller
//! on the store, select the requested day, and wait for the first ready
//! snapshot — the same path an embedding UI consumes.

use std::path::Path;

use anyhow::{bail, Context, Result};
use outlay_core::controller::{Controller, DayViews, ViewState};
use outlay_core::db::Database;
use outlay_core::export::{format_day, report_csv, report_json, ReportFormat};
use outlay_core::window::day_start;

use super::parse_day;

/// Select `day` on a fresh controller and wait for its ready snapshot.
async fn ready_views(db: &Database, day: i64) -> Result<DayViews> {
    let controller = Controller::with_selected_day(db.clone(), day);
    let mut updates = controller.subscribe();
    let day = day_start(day);

    loop {
        let update = updates.borrow_and_update().clone();
        if update.day == day {
            match update.views {
                ViewState::Ready(views) => return Ok(views),
                ViewState::Failed(message) => bail!("Report query failed: {message}"),
                ViewState::Loading => {}
            }
        }
        updates
            .changed()
            .await
            .context("View controller stopped unexpectedly")?;
    }
}

pub async fn cmd_report(db: &Database, date: Option<&str>, json: bool) -> Result<()> {
    let day = parse_day(date)?;
    let views = ready_views(db, day).await?;
    let day = day_start(day);

    if json {
        let payload = serde_json::json!({
            "day": format_day(day),
            "total": views.total,
            "category_totals": views.category_totals,
            "rolling": views.rolling,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!();
    println!("📊 Report for {}", format_day(day));
    println!("   Day total: ${:.2} across {} expense(s)", views.total, views.expenses.len());

    if !views.category_totals.is_empty() {
        println!();
        println!("   {:20} │ {:>10}", "Category", "Amount");
        println!("   ─────────────────────┼───────────");
        let mut categories: Vec<_> = views.category_totals.iter().collect();
        categories.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));
        for (category, total) in categories {
            println!("   {:20} │ {:>10.2}", category, total);
        }
    }

    println!();
    println!("   Last 7 days:");
    let max = views
        .rolling
        .iter()
        .map(|p| p.total)
        .fold(0.0_f64, f64::max);
    for point in &views.rolling {
        let bar_len = if max > 0.0 {
            ((point.total / max) * 24.0).round() as usize
        } else {
            0
        };
        println!(
            "   {} │ {:>10.2} │ {}",
            format_day(point.day),
            point.total,
            "█".repeat(bar_len),
        );
    }

    Ok(())
}

pub async fn cmd_export(
    db: &Database,
    date: Option<&str>,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format = match format.to_lowercase().as_str() {
        "csv" => ReportFormat::Csv,
        "json" => ReportFormat::Json,
        other => bail!("Unknown format: {}. Available: csv, json", other),
    };

    let day = parse_day(date)?;
    let views = ready_views(db, day).await?;

    let body = match format {
        ReportFormat::Csv => report_csv(&views.rolling, &views.category_totals),
        ReportFormat::Json => report_json(&views.rolling, &views.category_totals)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Wrote report to {}", path.display());
        }
        None => print!("{body}"),
    }

    Ok(())
}
