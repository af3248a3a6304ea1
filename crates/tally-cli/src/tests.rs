//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Timelike};
use rust_decimal::Decimal;
use tally_core::db::Database;
use tally_core::models::{TransactionFilter, TransactionKind};

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A registered user with one account, returning (user_id, account_id)
fn setup_user(db: &Database) -> (i64, i64) {
    commands::cmd_users_add(db, "Ana@Example.com", "correct horse").unwrap();
    let user = commands::resolve_user(db, "ana@example.com").unwrap();
    commands::cmd_accounts_add(db, user.id, "Checking", "bank", dec("100")).unwrap();
    let account = db.list_accounts(user.id).unwrap().remove(0);
    (user.id, account.id)
}

// ========== Init & Users ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");

    let result = commands::cmd_init(&path);
    assert!(result.is_ok());
    assert!(path.exists());

    // Re-running against an existing file is fine
    assert!(commands::cmd_init(&path).is_ok());
}

#[test]
fn test_cmd_users_add_seeds_categories() {
    let db = setup_test_db();
    let result = commands::cmd_users_add(&db, "ana@example.com", "correct horse");
    assert!(result.is_ok());

    let user = db.get_user_by_email("ana@example.com").unwrap().unwrap();
    assert_eq!(db.list_categories(user.id, None).unwrap().len(), 10);
}

#[test]
fn test_cmd_users_add_rejects_duplicate_and_weak_password() {
    let db = setup_test_db();
    commands::cmd_users_add(&db, "ana@example.com", "correct horse").unwrap();

    assert!(commands::cmd_users_add(&db, "ana@example.com", "correct horse").is_err());
    assert!(commands::cmd_users_add(&db, "ben@example.com", "short").is_err());
}

#[test]
fn test_resolve_user_is_case_insensitive() {
    let db = setup_test_db();
    commands::cmd_users_add(&db, "ana@example.com", "correct horse").unwrap();

    assert!(commands::resolve_user(&db, "ANA@example.com").is_ok());
    let err = commands::resolve_user(&db, "nobody@example.com").unwrap_err();
    assert!(err.to_string().contains("No user with email"));
}

// ========== Accounts & Categories ==========

#[test]
fn test_cmd_accounts_add_and_list() {
    let db = setup_test_db();
    let (user_id, _) = setup_user(&db);

    assert!(commands::cmd_accounts_add(&db, user_id, "Wallet", "cash", Decimal::ZERO).is_ok());
    assert!(commands::cmd_accounts_list(&db, user_id).is_ok());
    assert_eq!(db.list_accounts(user_id).unwrap().len(), 2);
}

#[test]
fn test_cmd_accounts_add_unknown_kind() {
    let db = setup_test_db();
    let (user_id, _) = setup_user(&db);
    assert!(commands::cmd_accounts_add(&db, user_id, "Vault", "piggybank", Decimal::ZERO).is_err());
}

#[test]
fn test_cmd_categories_add_and_filter() {
    let db = setup_test_db();
    let (user_id, _) = setup_user(&db);

    assert!(commands::cmd_categories_add(&db, user_id, "Pets", "pets", "expense").is_ok());
    assert!(commands::cmd_categories_list(&db, user_id, Some("income")).is_ok());
    assert!(commands::cmd_categories_list(&db, user_id, Some("savings")).is_err());
    assert_eq!(db.list_categories(user_id, None).unwrap().len(), 11);
}

// ========== Transactions ==========

#[test]
fn test_cmd_transactions_add_and_list() {
    let db = setup_test_db();
    let (user_id, account_id) = setup_user(&db);

    let result = commands::cmd_transactions_add(
        &db,
        user_id,
        account_id,
        dec("12.50"),
        "Food",
        "expense",
        Some("2024-03-05"),
        Some("lunch".to_string()),
    );
    assert!(result.is_ok());

    let txs = db
        .list_transactions(user_id, &TransactionFilter::default())
        .unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, dec("12.50"));
    assert_eq!(txs[0].kind, TransactionKind::Expense);
    assert_eq!(txs[0].occurred_at.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(txs[0].note.as_deref(), Some("lunch"));

    assert!(commands::cmd_transactions_list(&db, user_id, None, None, 20).is_ok());
    assert!(
        commands::cmd_transactions_list(&db, user_id, Some(account_id), Some("income"), 20).is_ok()
    );
    assert!(commands::cmd_transactions_list(&db, user_id, None, Some("refund"), 20).is_err());
}

#[test]
fn test_cmd_transactions_add_rejects_bad_input() {
    let db = setup_test_db();
    let (user_id, account_id) = setup_user(&db);

    // Unknown kind
    assert!(commands::cmd_transactions_add(
        &db, user_id, account_id, dec("1"), "Food", "refund", None, None
    )
    .is_err());
    // Bad date
    assert!(commands::cmd_transactions_add(
        &db,
        user_id,
        account_id,
        dec("1"),
        "Food",
        "expense",
        Some("05/03/2024"),
        None
    )
    .is_err());
    // Account that does not exist
    assert!(commands::cmd_transactions_add(
        &db, user_id, 9999, dec("1"), "Food", "expense", None, None
    )
    .is_err());
}

#[test]
fn test_parse_occurred_at_formats() {
    let full = commands::parse_occurred_at("2024-03-05T18:45:00").unwrap();
    assert_eq!(full.hour(), 18);
    assert_eq!(full.minute(), 45);

    let bare = commands::parse_occurred_at("2024-03-05").unwrap();
    assert_eq!(bare.day(), 5);
    assert_eq!(bare.hour(), 0);

    assert!(commands::parse_occurred_at("yesterday").is_err());
}

#[test]
fn test_resolve_month_defaults() {
    assert_eq!(commands::resolve_month(Some(3), Some(2024)), (3, 2024));

    let (month, year) = commands::resolve_month(None, None);
    assert!((1..=12).contains(&month));
    assert!(year >= 2024);
}

// ========== Budgets & Reports ==========

/// Food spending in Feb/Mar 2024 and a Food budget for March
fn setup_spending(db: &Database) -> i64 {
    let (user_id, account_id) = setup_user(db);
    for (amount, date) in [("50", "2024-02-10"), ("100", "2024-03-02"), ("50", "2024-03-20")] {
        commands::cmd_transactions_add(
            db,
            user_id,
            account_id,
            dec(amount),
            "Food",
            "expense",
            Some(date),
            None,
        )
        .unwrap();
    }
    commands::cmd_budgets_add(db, user_id, "Food", dec("200"), 3, 2024).unwrap();
    user_id
}

#[test]
fn test_cmd_budgets_add_and_list() {
    let db = setup_test_db();
    let user_id = setup_spending(&db);

    assert!(commands::cmd_budgets_list(&db, user_id, Some(3), Some(2024)).is_ok());
    assert!(commands::cmd_budgets_list(&db, user_id, None, None).is_ok());
    assert!(commands::cmd_budgets_add(&db, user_id, "Food", dec("200"), 13, 2024).is_err());
    assert_eq!(db.list_budgets(user_id, None, None).unwrap().len(), 1);
}

#[test]
fn test_cmd_dashboard() {
    let db = setup_test_db();
    let user_id = setup_spending(&db);
    let now = commands::resolve_now(Some("2024-03-20")).unwrap();

    assert!(commands::cmd_dashboard(&db, user_id, now, false).is_ok());
    assert!(commands::cmd_dashboard(&db, user_id, now, true).is_ok());
    assert!(commands::resolve_now(Some("March 20")).is_err());
}

#[test]
fn test_cmd_report_budgets() {
    let db = setup_test_db();
    let user_id = setup_spending(&db);

    assert!(commands::cmd_report_budgets(&db, user_id, 3, 2024, false).is_ok());
    assert!(commands::cmd_report_budgets(&db, user_id, 3, 2024, true).is_ok());
    assert!(commands::cmd_report_budgets(&db, user_id, 0, 2024, false).is_err());
}

#[test]
fn test_cmd_report_analytics() {
    let db = setup_test_db();
    let user_id = setup_spending(&db);

    assert!(commands::cmd_report_analytics(&db, user_id, 3, 2024, 6, false).is_ok());
    assert!(commands::cmd_report_analytics(&db, user_id, 3, 2024, 3, true).is_ok());
    assert!(commands::cmd_report_analytics(&db, user_id, 3, 2024, 0, false).is_err());
    assert!(commands::cmd_report_analytics(&db, user_id, 3, 2024, 10_000, false).is_err());
    assert!(commands::cmd_report_analytics(&db, user_id, 3, 200_000_000, 6, false).is_err());
}

// ========== Helpers ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("this is a long string", 10), "this is...");
    assert_eq!(truncate("café au lait", 7), "café...");
}
