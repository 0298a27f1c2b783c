//! Expense entry and listing commands

use anyhow::Result;
use outlay_core::aggregate::day_total;
use outlay_core::db::Database;
use outlay_core::export::format_day;
use outlay_core::models::ExpenseDraft;
use outlay_core::window::day_window;

use super::{parse_day, truncate};

pub fn cmd_add(
    db: &Database,
    title: &str,
    amount: f64,
    category: &str,
    notes: Option<&str>,
    date: Option<&str>,
    attachment: Option<&str>,
) -> Result<()> {
    let date = parse_day(date)?;
    let draft = ExpenseDraft {
        title: title.to_string(),
        amount,
        category: category.to_string(),
        notes: notes.map(str::to_string),
        date,
        attachment_ref: attachment.map(str::to_string),
    };

    let expense = db.insert_expense(&draft)?;
    println!(
        "✅ Recorded #{}: {} ${:.2} ({}) on {}",
        expense.id,
        expense.title,
        expense.amount,
        expense.category,
        format_day(outlay_core::day_start(expense.date)),
    );

    Ok(())
}

pub fn cmd_list(db: &Database, date: Option<&str>, json: bool) -> Result<()> {
    let day = parse_day(date)?;
    let window = day_window(day);
    let expenses = db.expenses_in_range(window.start, window.end)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&expenses)?);
        return Ok(());
    }

    if expenses.is_empty() {
        println!("No expenses on {}.", format_day(window.start));
        return Ok(());
    }

    println!();
    println!("💸 Expenses for {}", format_day(window.start));
    println!(
        "   {:>4} │ {:24} │ {:>10} │ {:14} │ {}",
        "ID", "Title", "Amount", "Category", "Notes"
    );
    println!("   ─────┼──────────────────────────┼────────────┼────────────────┼─────────");
    for e in &expenses {
        println!(
            "   {:>4} │ {:24} │ {:>10.2} │ {:14} │ {}",
            e.id,
            truncate(&e.title, 24),
            e.amount,
            truncate(&e.category, 14),
            e.notes.as_deref().unwrap_or(""),
        );
    }
    println!();
    println!("   Total: ${:.2}", day_total(&expenses));

    Ok(())
}
