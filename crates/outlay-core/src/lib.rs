//! Outlay Core Library
//!
//! Shared functionality for the outlay expense tracker:
//! - Expense store with migrations and a write change feed
//! - Day-bucket window math
//! - Pure aggregation into daily, per-category and rolling views
//! - Selected-day controller publishing consistent view snapshots
//! - Report text generation (CSV and plain text)

pub mod aggregate;
pub mod controller;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod window;

pub use controller::{Controller, DayViews, ViewState, ViewUpdate};
pub use db::{Database, StoreEvent};
pub use error::{Error, Result};
pub use models::{DayTotal, Expense, ExpenseDraft};
pub use window::{day_start, day_window, last7_window, DayWindow, DAY_MS};
