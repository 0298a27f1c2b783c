//! Expense store: connection pooling, migrations, and the change feed
//!
//! This module is organized by domain:
//! - `expenses` - Expense insert and range queries
//!
//! The store is insert-only: records are never updated or deleted. Every
//! committed insert is announced on a watch-based change feed so active
//! range subscriptions can re-read their window without polling.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tokio::sync::watch;
use tracing::info;

use crate::error::Result;

mod expenses;


pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// A committed write, published on the store's change feed.
///
/// `seq` increases with every insert; `day` is the day bucket the new
/// record landed in. Watch receivers conflate rapid events, so treat an
/// observed event as "something changed since last seen" and re-read the
/// whole window of interest rather than interpreting `day` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    pub seq: u64,
    pub day: i64,
}

/// Expense store backed by a pooled SQLite database.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
    changes: watch::Sender<StoreEvent>,
}

impl Database {
    /// Create a new database connection pool and run migrations.
    pub fn new(path: &str) -> Result<Self> {
        // Concurrent inserts from pooled connections wait for the write
        // lock instead of failing with SQLITE_BUSY.
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.busy_timeout(std::time::Duration::from_secs(5))?;
            Ok(())
        });
        let pool = Pool::builder().max_size(10).build(manager)?;
        let (changes, _) = watch::channel(StoreEvent { seq: 0, day: 0 });

        let db = Self {
            pool,
            db_path: path.to_string(),
            changes,
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every
    /// pooled connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = format!(
            "{}/outlay_test_{}_{}.db",
            std::env::temp_dir().display(),
            std::process::id(),
            id
        );

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Subscribe to the change feed. The receiver starts at the current
    /// event; `changed()` resolves once a later insert commits.
    pub fn watch_changes(&self) -> watch::Receiver<StoreEvent> {
        self.changes.subscribe()
    }

    /// Announce a committed insert into `day`'s bucket.
    pub(crate) fn publish_insert(&self, day: i64) {
        self.changes.send_modify(|event| {
            event.seq += 1;
            event.day = day;
        });
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the writer, which keeps range
            -- subscriptions responsive while inserts commit
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: safe for most power-loss scenarios
            PRAGMA synchronous = NORMAL;

            -- Store temp tables in memory
            PRAGMA temp_store = MEMORY;

            -- Expense records (insert-only)
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                notes TEXT,
                date INTEGER NOT NULL,      -- epoch millis, bucketed by day for aggregation
                attachment_ref TEXT
            );

            -- Every query in this store is a date-range scan
            CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}
