//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, resolve_user, date parsing)
//! - `users` - User registration
//! - `accounts` - Account commands (list, add)
//! - `categories` - Category commands (list, add)
//! - `transactions` - Transaction commands (list, add)
//! - `budgets` - Budget commands (list, add)
//! - `reports` - Dashboard, budget progress and analytics reports
//! - `serve` - Web server command

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod core;
pub mod reports;
pub mod serve;
pub mod transactions;
pub mod users;

// Re-export command functions for main.rs
pub use accounts::*;
pub use budgets::*;
pub use categories::*;
pub use self::core::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;
pub use users::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
