//! Report handlers: budget progress, dashboard and analytics

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::{AppError, AppState, AuthUser};
use tally_core::{
    analytics::{self, DEFAULT_TREND_WIDTH},
    models::{TransactionFilter, TransactionKind},
    AnalyticsReport, BudgetOverview, DashboardSummary,
};

/// Query parameters for month-scoped reports
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// Trailing trend width in months (analytics only)
    pub window: Option<u32>,
}

impl PeriodQuery {
    /// Requested month, falling back to the current local month
    fn month_and_year(&self) -> (u32, i32) {
        let today = Local::now().date_naive();
        (
            self.month.unwrap_or_else(|| today.month()),
            self.year.unwrap_or_else(|| today.year()),
        )
    }
}

/// Query parameters for the dashboard
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Day to report on (YYYY-MM-DD), defaults to local today
    pub date: Option<String>,
}

/// GET /api/budgets/progress?month=3&year=2024
pub async fn budget_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<BudgetOverview>, AppError> {
    let (month, year) = params.month_and_year();

    let budgets = state.db.list_budgets(user.id, Some(month), Some(year))?;
    let expenses = state.db.list_transactions(
        user.id,
        &TransactionFilter {
            account_id: None,
            kind: Some(TransactionKind::Expense),
        },
    )?;

    let overview = analytics::compute_budget_progress(&budgets, &expenses, month, year)?;
    Ok(Json(overview))
}

/// GET /api/dashboard?date=2024-03-20
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let now: NaiveDateTime = match params.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))?
            .and_time(chrono::NaiveTime::MIN),
        None => Local::now().naive_local(),
    };

    let transactions = state
        .db
        .list_transactions(user.id, &TransactionFilter::default())?;

    let summary =
        analytics::compute_dashboard(&transactions, now, now.month(), now.year())?;
    Ok(Json(summary))
}

/// GET /api/analytics?month=3&year=2024&window=6
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let (month, year) = params.month_and_year();
    let window = params.window.unwrap_or(DEFAULT_TREND_WIDTH);

    let expenses = state.db.list_transactions(
        user.id,
        &TransactionFilter {
            account_id: None,
            kind: Some(TransactionKind::Expense),
        },
    )?;

    let report = analytics::compute_analytics(&expenses, month, year, window)?;
    Ok(Json(report))
}
