//! Registration, login and identity handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{issue_token, json_body, AppError, AppState, AuthUser};
use tally_core::{auth, models::User};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Request body for register and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the user it was issued to
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Liveness probe
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// POST /api/auth/register - Create a user and sign them in
///
/// New users get the default category set.
pub async fn register(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let req: CredentialsRequest = json_body(request).await?;
    let email = req.email.trim().to_lowercase();

    auth::validate_credentials(&email, &req.password)?;
    let hash = auth::hash_password(&req.password)?;

    let user = state.db.create_user(&email, &hash)?;
    let seeded = state.db.seed_default_categories(user.id)?;
    info!(user_id = user.id, seeded, "Registered new user");

    let token = issue_token(user.id, &state.config.jwt)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /api/auth/login - Exchange credentials for a token
pub async fn login(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<AuthResponse>, AppError> {
    let req: CredentialsRequest = json_body(request).await?;
    let email = req.email.trim().to_lowercase();

    let Some(user) = state.db.get_user_by_email(&email)? else {
        warn!("Login attempt for unknown email");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };

    if !auth::verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = user.id, "Login attempt with wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = issue_token(user.id, &state.config.jwt)?;
    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/me - The authenticated user
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<User>, AppError> {
    let user = state
        .db
        .get_user(caller.id)?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(user))
}
