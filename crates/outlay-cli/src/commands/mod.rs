//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - init/status and shared utilities (open_db, day parsing)
//! - `expenses` - add/list commands
//! - `reports` - report/export rendering driven by the view controller

pub mod core;
pub mod expenses;
pub mod reports;

// Re-export command functions for main.rs
pub use core::*;
pub use expenses::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
