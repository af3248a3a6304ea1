//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `resolve_user` - Look up the user a command acts for
//! - Date helpers shared by several commands
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tally_core::{db::Database, models::User};

/// Open (and migrate) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Find a user by email or fail with a hint
pub fn resolve_user(db: &Database, email: &str) -> Result<User> {
    db.get_user_by_email(&email.trim().to_lowercase())?
        .with_context(|| {
            format!(
                "No user with email {}. Create one with: tally users add {} --password ...",
                email, email
            )
        })
}

/// Month and year, each defaulting to the current local month
pub fn resolve_month(month: Option<u32>, year: Option<i32>) -> (u32, i32) {
    let today = Local::now().date_naive();
    (
        month.unwrap_or_else(|| today.month()),
        year.unwrap_or_else(|| today.year()),
    )
}

/// Parse a `--date` value (YYYY-MM-DD), defaulting to the current local time
pub fn resolve_now(date: Option<&str>) -> Result<NaiveDateTime> {
    match date {
        Some(raw) => Ok(parse_date(raw)?.and_time(NaiveTime::MIN)),
        None => Ok(Local::now().naive_local()),
    }
}

/// Parse a timestamp given either as a full datetime or as a bare date
pub fn parse_occurred_at(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    Ok(parse_date(raw)?.and_time(NaiveTime::MIN))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", raw))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Create a user: tally users add you@example.com --password ...");
    println!("  2. Add an account: tally accounts --user you@example.com add Checking");
    println!("  3. Start web API: TALLY_JWT_SECRET=... tally serve");

    Ok(())
}
