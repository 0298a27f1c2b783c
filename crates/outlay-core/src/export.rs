//! Report text generation
//!
//! Pure formatting over the aggregation engine's output types: a CSV
//! document with "Last 7 Days" and "Category Totals" sections, and a
//! plain-text report for terminal or share targets. Nothing here reads
//! the store.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::DayTotal;

/// Report output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
}

/// Render a day bucket as a YYYY-MM-DD label (UTC).
pub fn format_day(day: i64) -> String {
    chrono::DateTime::from_timestamp_millis(day)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| day.to_string())
}

/// CSV report with a "Last 7 Days" section and a "Category Totals"
/// section.
pub fn report_csv(rolling: &[DayTotal], categories: &BTreeMap<String, f64>) -> String {
    let mut csv = String::from("Last 7 Days\nday,total\n");
    for point in rolling {
        csv.push_str(&format!("{},{:.2}\n", format_day(point.day), point.total));
    }

    csv.push_str("\nCategory Totals\ncategory,total\n");
    for (category, total) in sorted_for_display(categories) {
        csv.push_str(&format!("{},{:.2}\n", escape_csv_field(category), total));
    }

    csv
}

/// JSON report over the same inputs as [`report_csv`], for machine
/// consumers.
pub fn report_json(rolling: &[DayTotal], categories: &BTreeMap<String, f64>) -> Result<String> {
    let payload = serde_json::json!({
        "last_7_days": rolling,
        "category_totals": categories,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Plain-text report over the same inputs as [`report_csv`].
pub fn report_text(rolling: &[DayTotal], categories: &BTreeMap<String, f64>) -> String {
    let week_total: f64 = rolling.iter().map(|p| p.total).sum();

    let mut out = String::from("Last 7 days\n");
    for point in rolling {
        out.push_str(&format!("  {}  {:>10.2}\n", format_day(point.day), point.total));
    }
    out.push_str(&format!("  Week total  {:>8.2}\n", week_total));

    out.push_str("\nCategory totals\n");
    if categories.is_empty() {
        out.push_str("  (no expenses)\n");
    }
    for (category, total) in sorted_for_display(categories) {
        out.push_str(&format!("  {:<20}  {:>10.2}\n", category, total));
    }

    out
}

/// Categories sorted case-insensitively for display.
fn sorted_for_display(categories: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut entries: Vec<(&str, f64)> = categories
        .iter()
        .map(|(category, total)| (category.as_str(), *total))
        .collect();
    entries.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));
    entries
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
