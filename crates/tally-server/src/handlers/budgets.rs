//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{json_body, AppError, AppState, AuthUser};
use tally_core::models::{Budget, NewBudget};

/// Query parameters selecting a budget month
#[derive(Debug, Deserialize)]
pub struct BudgetQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// GET /api/budgets?month=3&year=2024
///
/// The period filter only applies when both month and year are given.
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<BudgetQuery>,
) -> Result<Json<Vec<Budget>>, AppError> {
    Ok(Json(
        state.db.list_budgets(user.id, params.month, params.year)?,
    ))
}

/// GET /api/budgets/:id
pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Budget>, AppError> {
    state
        .db
        .get_budget(user.id, id)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Budget not found"))
}

/// POST /api/budgets
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    request: Request,
) -> Result<(StatusCode, Json<Budget>), AppError> {
    let req: NewBudget = json_body(request).await?;
    let budget = state.db.create_budget(user.id, &req)?;
    Ok((StatusCode::CREATED, Json(budget)))
}

/// PUT /api/budgets/:id
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Budget>, AppError> {
    let req: NewBudget = json_body(request).await?;
    state
        .db
        .update_budget(user.id, id, &req)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Budget not found"))
}

/// DELETE /api/budgets/:id
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_budget(user.id, id)? {
        return Err(AppError::not_found("Budget not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
