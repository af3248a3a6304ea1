//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{json_body, AppError, AppState, AuthUser};
use tally_core::models::{NewTransaction, Transaction, TransactionFilter, TransactionKind};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    pub account_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/transactions?account_id=1&type=expense
///
/// Both filters apply together when given. Newest first.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let kind = params
        .kind
        .as_deref()
        .map(|k| k.parse::<TransactionKind>())
        .transpose()
        .map_err(|e| AppError::bad_request(&e))?;

    let filter = TransactionFilter {
        account_id: params.account_id,
        kind,
    };

    Ok(Json(state.db.list_transactions(user.id, &filter)?))
}

/// GET /api/transactions/:id
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, AppError> {
    state
        .db
        .get_transaction(user.id, id)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Transaction not found"))
}

/// POST /api/transactions
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    request: Request,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let req: NewTransaction = json_body(request).await?;
    let tx = state.db.create_transaction(user.id, &req)?;
    Ok((StatusCode::CREATED, Json(tx)))
}

/// PUT /api/transactions/:id
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let req: NewTransaction = json_body(request).await?;
    state
        .db
        .update_transaction(user.id, id, &req)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Transaction not found"))
}

/// DELETE /api/transactions/:id
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_transaction(user.id, id)? {
        return Err(AppError::not_found("Transaction not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
