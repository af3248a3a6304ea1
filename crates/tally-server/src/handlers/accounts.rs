//! Account management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{json_body, AppError, AppState, AuthUser};
use tally_core::models::{Account, NewAccount};

/// GET /api/accounts - List the caller's accounts
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Account>>, AppError> {
    Ok(Json(state.db.list_accounts(user.id)?))
}

/// GET /api/accounts/:id
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Account>, AppError> {
    state
        .db
        .get_account(user.id, id)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Account not found"))
}

/// POST /api/accounts - Create a new account
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    request: Request,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let req: NewAccount = json_body(request).await?;
    let account = state.db.create_account(user.id, &req)?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// PUT /api/accounts/:id - Replace an account's fields
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Account>, AppError> {
    let req: NewAccount = json_body(request).await?;
    state
        .db
        .update_account(user.id, id, &req)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Account not found"))
}

/// DELETE /api/accounts/:id - Delete an account and its transactions
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_account(user.id, id)? {
        return Err(AppError::not_found("Account not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
