//! Selected-day state and its derived subscriptions
//!
//! The controller owns one piece of mutable state, the selected day, and
//! keeps a set of derived views consistent with it: the day's expenses,
//! the day total, per-category totals, and the 7-day rolling series.
//! Views recompute whenever the selection moves or the store announces a
//! write.
//!
//! The derivation is switch-latest: each wake queries the store for the
//! windows of the *current* selection, and a selection change while a
//! query is in flight discards that query's result. Consumers only ever
//! observe snapshots belonging to the newest selection, and every
//! snapshot is published whole, so the expense list, totals and rolling
//! series can never disagree with each other.

use std::collections::BTreeMap;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::aggregate::{category_totals, day_total, rolling_series};
use crate::db::{Database, StoreEvent};
use crate::error::Result;
use crate::models::{DayTotal, Expense, ExpenseDraft};
use crate::window::{day_start, day_window, last7_window};

/// Lifecycle of a derived view's value.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// No result yet for the current selection.
    Loading,
    Ready(T),
    /// The upstream query failed. Consumers should present an error, not
    /// stale data from another selection.
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Ready(value) => ViewState::Ready(f(value)),
            ViewState::Failed(message) => ViewState::Failed(message),
        }
    }
}

/// All derived views for one selected day, computed from one consistent
/// set of store reads.
#[derive(Debug, Clone, PartialEq)]
pub struct DayViews {
    /// Records in the selected day's window, newest first.
    pub expenses: Vec<Expense>,
    /// Sum over `expenses`.
    pub total: f64,
    /// Per-category sums over `expenses`.
    pub category_totals: BTreeMap<String, f64>,
    /// 7-day rolling series ending at the selected day, oldest first.
    pub rolling: Vec<DayTotal>,
}

/// One publication from the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    /// Day bucket (start-of-day millis) the views are bound to.
    pub day: i64,
    pub views: ViewState<DayViews>,
}

/// Selection and subscription controller.
///
/// Owns the selected day and a driver task that keeps the derived views
/// current. Several controllers may share one [`Database`]; they are
/// fully independent. Dropping the controller stops the driver.
///
/// Must be constructed inside a tokio runtime.
pub struct Controller {
    store: Database,
    selected_day: watch::Sender<i64>,
    updates: watch::Receiver<ViewUpdate>,
    driver: JoinHandle<()>,
}

impl Controller {
    /// Controller with the selection initialized to the current day.
    pub fn new(store: Database) -> Self {
        Self::with_selected_day(store, chrono::Utc::now().timestamp_millis())
    }

    /// Controller with the selection initialized to `day`'s bucket.
    pub fn with_selected_day(store: Database, day: i64) -> Self {
        let day = day_start(day);
        let (day_tx, day_rx) = watch::channel(day);
        let (update_tx, update_rx) = watch::channel(ViewUpdate {
            day,
            views: ViewState::Loading,
        });
        let driver = tokio::spawn(drive(
            store.clone(),
            day_rx,
            store.watch_changes(),
            update_tx,
        ));
        Self {
            store,
            selected_day: day_tx,
            updates: update_rx,
            driver,
        }
    }

    /// Move the selection to `day`'s bucket.
    ///
    /// Non-blocking: the driver re-queries asynchronously and any query
    /// still in flight for the previous selection is discarded.
    /// Re-selecting the current day is a no-op, so repeated calls with
    /// the same day publish nothing new.
    pub fn set_date(&self, day: i64) {
        let day = day_start(day);
        self.selected_day.send_if_modified(|current| {
            if *current == day {
                false
            } else {
                *current = day;
                true
            }
        });
    }

    /// The currently selected day bucket (start-of-day millis).
    pub fn selected_day(&self) -> i64 {
        *self.selected_day.borrow()
    }

    /// Validate and persist a draft.
    ///
    /// Does not touch the views directly; they update via the store's
    /// change feed. Validation and store errors propagate to the caller.
    pub fn add_expense(&self, draft: ExpenseDraft) -> Result<Expense> {
        draft.validate()?;
        self.store.insert_expense(&draft)
    }

    /// Subscribe to view snapshots. The receiver always holds the latest
    /// publication; intermediate snapshots may be conflated away.
    pub fn subscribe(&self) -> watch::Receiver<ViewUpdate> {
        self.updates.clone()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> ViewUpdate {
        self.updates.borrow().clone()
    }

    pub fn expenses_for_selected_day(&self) -> ViewState<Vec<Expense>> {
        self.snapshot().views.map(|v| v.expenses)
    }

    pub fn total_for_selected_day(&self) -> ViewState<f64> {
        self.snapshot().views.map(|v| v.total)
    }

    pub fn category_totals_for_selected_day(&self) -> ViewState<BTreeMap<String, f64>> {
        self.snapshot().views.map(|v| v.category_totals)
    }

    pub fn rolling_series_ending_selected_day(&self) -> ViewState<Vec<DayTotal>> {
        self.snapshot().views.map(|v| v.rolling)
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Driver loop: one task per controller, sole writer of the update
/// channel.
async fn drive(
    store: Database,
    mut day_rx: watch::Receiver<i64>,
    mut changes: watch::Receiver<StoreEvent>,
    updates: watch::Sender<ViewUpdate>,
) {
    let mut published_day: Option<i64> = None;

    loop {
        let day = *day_rx.borrow_and_update();
        // Writes committed before this point are covered by the query
        // below; anything later re-triggers via `changes.changed()`.
        let _ = *changes.borrow_and_update();

        if published_day != Some(day) {
            let loading = ViewUpdate {
                day,
                views: ViewState::Loading,
            };
            let already_current = *updates.borrow() == loading;
            if !already_current {
                let _ = updates.send(loading);
            }
            published_day = Some(day);
        }

        let query_store = store.clone();
        let query = tokio::task::spawn_blocking(move || load_views(&query_store, day));

        let outcome = tokio::select! {
            // A selection change supersedes the in-flight query: its
            // result is dropped here even if the blocking read completes.
            changed = day_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                debug!(day, "selection changed mid-query, discarding result");
                continue;
            }
            joined = query => joined,
        };

        let views = match outcome {
            Ok(Ok(views)) => ViewState::Ready(views),
            Ok(Err(e)) => {
                warn!(day, error = %e, "view refresh failed");
                ViewState::Failed(e.to_string())
            }
            Err(e) => {
                warn!(day, error = %e, "view query task failed");
                ViewState::Failed(e.to_string())
            }
        };

        let update = ViewUpdate { day, views };
        // Identical snapshots are not republished: a write that does not
        // intersect the selected windows stays invisible downstream.
        let unchanged = *updates.borrow() == update;
        if !unchanged && updates.send(update).is_err() {
            return;
        }

        tokio::select! {
            changed = day_rx.changed() => {
                if changed.is_err() {
                    return;
                }
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    return;
                }
            }
        }
    }
}

/// Query both windows for `day` and derive every view from those reads.
///
/// Category totals come from the same record set as the expense list, so
/// the two can never disagree.
fn load_views(store: &Database, day: i64) -> Result<DayViews> {
    let dw = day_window(day);
    let ww = last7_window(day);
    let expenses = store.expenses_in_range(dw.start, dw.end)?;
    let week = store.expenses_in_range(ww.start, ww.end)?;

    let total = day_total(&expenses);
    let categories = category_totals(&expenses);
    let rolling = rolling_series(&week, day);

    Ok(DayViews {
        expenses,
        total,
        category_totals: categories,
        rolling,
    })
}
