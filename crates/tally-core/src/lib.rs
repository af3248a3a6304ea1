//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Domain models (accounts, categories, transactions, budgets)
//! - Financial aggregation engine (budget progress, dashboard, analytics)
//! - Database access and migrations
//! - Password hashing

pub mod analytics;
pub mod auth;
pub mod db;
pub mod error;
pub mod models;

pub use analytics::{
    compute_analytics, compute_budget_progress, compute_dashboard, AnalyticsReport,
    BudgetOverview, DashboardSummary, Insight, MonthPeriod,
};
pub use db::Database;
pub use error::{Error, Result};
