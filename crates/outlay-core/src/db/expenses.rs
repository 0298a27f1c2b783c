//! Expense record operations

use rusqlite::params;
use tracing::debug;

use super::Database;
use crate::error::Result;
use crate::models::{round_cents, Expense, ExpenseDraft};
use crate::window::day_start;

impl Database {
    /// Insert an expense and return it with its assigned id.
    ///
    /// The draft is validated before anything is written, so an invalid
    /// draft leaves the store untouched. The stored amount is rounded to
    /// cents. A change event is published after the row commits.
    pub fn insert_expense(&self, draft: &ExpenseDraft) -> Result<Expense> {
        draft.validate()?;
        let amount = round_cents(draft.amount);

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO expenses (title, amount, category, notes, date, attachment_ref)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                draft.title,
                amount,
                draft.category,
                draft.notes,
                draft.date,
                draft.attachment_ref,
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        let day = day_start(draft.date);
        self.publish_insert(day);
        debug!(id, day, "expense inserted");

        Ok(Expense {
            id,
            title: draft.title.clone(),
            amount,
            category: draft.category.clone(),
            notes: draft.notes.clone(),
            date: draft.date,
            attachment_ref: draft.attachment_ref.clone(),
        })
    }

    /// Expenses with `date` in `[start, end]`, newest first.
    ///
    /// Ties on `date` break by id descending so the order is stable.
    pub fn expenses_in_range(&self, start: i64, end: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, title, amount, category, notes, date, attachment_ref
            FROM expenses
            WHERE date BETWEEN ?1 AND ?2
            ORDER BY date DESC, id DESC
            "#,
        )?;

        let expenses = stmt
            .query_map(params![start, end], |row| {
                Ok(Expense {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    amount: row.get(2)?,
                    category: row.get(3)?,
                    notes: row.get(4)?,
                    date: row.get(5)?,
                    attachment_ref: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Sum of `amount` over `[start, end]`; 0 for an empty range.
    pub fn sum_in_range(&self, start: i64, end: i64) -> Result<f64> {
        let conn = self.conn()?;
        let sum = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE date BETWEEN ?1 AND ?2",
            params![start, end],
            |row| row.get(0),
        )?;
        Ok(sum)
    }

    /// Number of records with `date` in `[start, end]`.
    pub fn count_in_range(&self, start: i64, end: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM expenses WHERE date BETWEEN ?1 AND ?2",
            params![start, end],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Total number of records in the store.
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Earliest and latest record dates, or None for an empty store.
    pub fn date_span(&self) -> Result<Option<(i64, i64)>> {
        let conn = self.conn()?;
        let span: (Option<i64>, Option<i64>) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM expenses",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(match span {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        })
    }
}
