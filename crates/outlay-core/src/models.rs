//! Domain models for outlay

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum length of the optional notes field, in characters.
pub const MAX_NOTES_LEN: usize = 100;

/// One logged expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub notes: Option<String>,
    /// Epoch millis; all windowing buckets this via `window::day_start`.
    pub date: i64,
    /// Opaque reference to an attached receipt image, if any.
    pub attachment_ref: Option<String>,
}

/// An expense as entered by the user, before the store assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub notes: Option<String>,
    pub date: i64,
    pub attachment_ref: Option<String>,
}

impl ExpenseDraft {
    /// Check the record invariants: non-blank title and category, positive
    /// finite amount (still positive after cent rounding), notes within
    /// [`MAX_NOTES_LEN`]. Runs before anything reaches the store.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title must not be blank".into()));
        }
        if self.category.trim().is_empty() {
            return Err(Error::Validation("category must not be blank".into()));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 || round_cents(self.amount) <= 0.0 {
            return Err(Error::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_NOTES_LEN {
                return Err(Error::Validation(format!(
                    "notes must be at most {} characters",
                    MAX_NOTES_LEN
                )));
            }
        }
        Ok(())
    }
}

/// One day bucket paired with its total, oldest-first in a rolling series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTotal {
    /// Start-of-day millis (a `window::day_start` value).
    pub day: i64,
    pub total: f64,
}

/// Round an amount to two decimal places.
///
/// Stored amounts carry two-decimal precision; drafts are rounded at
/// insert time.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
