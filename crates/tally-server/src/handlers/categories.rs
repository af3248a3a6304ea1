//! Category handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{json_body, AppError, AppState, AuthUser};
use tally_core::models::{Category, CategoryKind, NewCategory};

/// Query parameters for listing categories
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// Only income or only expense categories
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/categories?type=expense
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Vec<Category>>, AppError> {
    let kind = params
        .kind
        .as_deref()
        .map(|k| k.parse::<CategoryKind>())
        .transpose()
        .map_err(|e| AppError::bad_request(&e))?;

    Ok(Json(state.db.list_categories(user.id, kind)?))
}

/// GET /api/categories/:id
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, AppError> {
    state
        .db
        .get_category(user.id, id)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Category not found"))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    request: Request,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let req: NewCategory = json_body(request).await?;
    let category = state.db.create_category(user.id, &req)?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/:id
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Category>, AppError> {
    let req: NewCategory = json_body(request).await?;
    state
        .db
        .update_category(user.id, id, &req)?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Category not found"))
}

/// DELETE /api/categories/:id
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_category(user.id, id)? {
        return Err(AppError::not_found("Category not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
