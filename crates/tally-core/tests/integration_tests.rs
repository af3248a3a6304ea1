//! Integration tests for tally-core
//!
//! These tests exercise the full store → fetch → aggregate workflow.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{
    analytics::{self, Insight, DEFAULT_TREND_WIDTH},
    auth,
    db::Database,
    models::{
        AccountKind, NewAccount, NewBudget, NewTransaction, TransactionFilter, TransactionKind,
    },
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A user with one account and a spread of transactions across Jan-Mar 2024
fn seeded_db() -> (Database, i64) {
    let db = Database::in_memory().expect("Failed to create test database");
    let hash = auth::hash_password("hunter2hunter2").expect("Failed to hash");
    let user = db
        .create_user("saver@example.com", &hash)
        .expect("Failed to create user");

    let account = db
        .create_account(
            user.id,
            &NewAccount {
                name: "Everyday".to_string(),
                kind: AccountKind::Card,
                balance: dec("500"),
                color: 0,
            },
        )
        .expect("Failed to create account");

    let rows = [
        ("Food", "40", TransactionKind::Expense, (2024, 1, 10)),
        ("Food", "50", TransactionKind::Expense, (2024, 2, 10)),
        ("Food", "100", TransactionKind::Expense, (2024, 3, 2)),
        ("Food", "50", TransactionKind::Expense, (2024, 3, 20)),
        ("Rent", "200", TransactionKind::Expense, (2024, 3, 1)),
        ("Salary", "1500", TransactionKind::Income, (2024, 3, 1)),
        ("Savings", "300", TransactionKind::Transfer, (2024, 3, 5)),
    ];
    for (category, amount, kind, (y, m, d)) in rows {
        db.create_transaction(
            user.id,
            &NewTransaction {
                account_id: account.id,
                amount: dec(amount),
                category: category.to_string(),
                occurred_at: NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap(),
                note: None,
                kind,
            },
        )
        .expect("Failed to create transaction");
    }

    db.create_budget(
        user.id,
        &NewBudget {
            category: "Food".to_string(),
            amount: dec("200"),
            month: 3,
            year: 2024,
        },
    )
    .expect("Failed to create budget");
    db.create_budget(
        user.id,
        &NewBudget {
            category: "Fun".to_string(),
            amount: dec("80"),
            month: 3,
            year: 2024,
        },
    )
    .expect("Failed to create budget");

    (db, user.id)
}

#[test]
fn test_budget_progress_from_stored_rows() {
    let (db, user_id) = seeded_db();
    let txs = db
        .list_transactions(user_id, &TransactionFilter::default())
        .unwrap();
    let budgets = db.list_budgets(user_id, Some(3), Some(2024)).unwrap();

    let overview = analytics::compute_budget_progress(&budgets, &txs, 3, 2024).unwrap();

    assert_eq!(overview.budgets.len(), 2);
    assert_eq!(overview.budgets[0].budget.category, "Food");
    assert_eq!(overview.budgets[0].spent, dec("150"));
    assert_eq!(overview.budgets[0].ratio, 0.75);
    assert_eq!(overview.budgets[1].spent, Decimal::ZERO);
    assert_eq!(overview.total_limit, dec("280"));
    assert_eq!(overview.total_spent, dec("350"));
}

#[test]
fn test_dashboard_from_stored_rows() {
    let (db, user_id) = seeded_db();
    let txs = db
        .list_transactions(user_id, &TransactionFilter::default())
        .unwrap();
    let now = NaiveDate::from_ymd_opt(2024, 3, 20)
        .unwrap()
        .and_hms_opt(21, 0, 0)
        .unwrap();

    let summary = analytics::compute_dashboard(&txs, now, 3, 2024).unwrap();

    assert_eq!(summary.today_expense, dec("50"));
    assert_eq!(summary.today_income, Decimal::ZERO);
    assert_eq!(summary.month_income, dec("1500"));
    assert_eq!(summary.month_expense, dec("350"));
    assert_eq!(summary.recent_transactions.len(), 5);
    assert_eq!(summary.recent_transactions[0].category, "Food");
    assert_eq!(summary.recent_transactions[0].amount, dec("50"));
}

#[test]
fn test_analytics_from_stored_rows() {
    let (db, user_id) = seeded_db();
    let expenses = db
        .list_transactions(
            user_id,
            &TransactionFilter {
                account_id: None,
                kind: Some(TransactionKind::Expense),
            },
        )
        .unwrap();

    let report = analytics::compute_analytics(&expenses, 3, 2024, DEFAULT_TREND_WIDTH).unwrap();

    assert_eq!(report.total_expense, dec("350"));
    let amounts: Vec<Decimal> = report.trend.iter().map(|p| p.amount).collect();
    assert_eq!(
        amounts,
        vec![
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            dec("40"),
            dec("50"),
            dec("350")
        ]
    );
    assert_eq!(report.trend[0].label, "Oct");

    let messages: Vec<String> = report.insights.iter().map(|i| i.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "You spent the most on Rent this month (57%).".to_string(),
            "Spending increased by 600% compared to last month.".to_string(),
        ]
    );
}

#[test]
fn test_empty_month_reports_no_expenses() {
    let (db, user_id) = seeded_db();
    let txs = db
        .list_transactions(user_id, &TransactionFilter::default())
        .unwrap();

    let report = analytics::compute_analytics(&txs, 6, 2024, DEFAULT_TREND_WIDTH).unwrap();
    assert_eq!(report.insights, vec![Insight::NoExpenses]);

    let overview = analytics::compute_budget_progress(&[], &txs, 6, 2024).unwrap();
    assert_eq!(overview.total_spent, Decimal::ZERO);
}

#[test]
fn test_password_round_trip_through_store() {
    let (db, _) = seeded_db();
    let user = db.get_user_by_email("saver@example.com").unwrap().unwrap();
    assert!(auth::verify_password("hunter2hunter2", &user.password_hash).unwrap());
    assert!(!auth::verify_password("guess", &user.password_hash).unwrap());
}
