//! Tally Web Server
//!
//! Axum-based REST API for the Tally personal finance tracker.
//!
//! Security features:
//! - HS256 bearer tokens issued at register/login, required on every route
//!   except health and the auth endpoints
//! - Every resource query is scoped to the authenticated user
//! - Restrictive CORS policy
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

use tally_core::db::Database;

mod auth;
mod handlers;

pub use auth::{issue_token, validate_token, AuthUser, Claims};

/// Environment variable holding the JWT signing secret
pub const JWT_SECRET_ENV: &str = "TALLY_JWT_SECRET";

/// Environment variable overriding the token lifetime in seconds
pub const JWT_EXPIRATION_ENV: &str = "TALLY_JWT_EXPIRATION_SECS";

/// Environment variable listing allowed CORS origins (comma-separated)
pub const ALLOWED_ORIGINS_ENV: &str = "TALLY_ALLOWED_ORIGINS";

/// Default token lifetime (24 hours)
pub const DEFAULT_JWT_EXPIRATION_SECS: i64 = 24 * 60 * 60;

/// Shortest signing secret accepted from the environment
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Bearer token settings
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC secret used to sign and check tokens
    pub secret: String,
    /// Token lifetime in seconds
    pub expiration_secs: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_secs: DEFAULT_JWT_EXPIRATION_SECS,
        }
    }
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub jwt: JwtConfig,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            jwt,
            allowed_origins: vec![],
        }
    }

    /// Read configuration from `TALLY_*` environment variables
    ///
    /// The signing secret is required and must be at least
    /// `MIN_JWT_SECRET_LEN` bytes.
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var(JWT_SECRET_ENV).unwrap_or_default();
        if secret.len() < MIN_JWT_SECRET_LEN {
            anyhow::bail!(
                "{} must be set to a secret of at least {} characters",
                JWT_SECRET_ENV,
                MIN_JWT_SECRET_LEN
            );
        }

        let expiration_secs = match std::env::var(JWT_EXPIRATION_ENV) {
            Ok(raw) if !raw.trim().is_empty() => {
                let secs: i64 = raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("{} must be a number of seconds", JWT_EXPIRATION_ENV)
                })?;
                if secs <= 0 {
                    anyhow::bail!("{} must be positive", JWT_EXPIRATION_ENV);
                }
                secs
            }
            _ => DEFAULT_JWT_EXPIRATION_SECS,
        };

        let allowed_origins = parse_origins(&std::env::var(ALLOWED_ORIGINS_ENV).unwrap_or_default());

        Ok(Self {
            jwt: JwtConfig {
                secret,
                expiration_secs,
            },
            allowed_origins,
        })
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

/// Largest request body accepted by the JSON handlers
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Read and deserialize a JSON request body
pub(crate) async fn json_body<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        debug!(error = %e, "Rejected request body");
        AppError::bad_request("Invalid JSON")
    })
}

/// Authentication middleware - requires a valid bearer token for a user that
/// still exists, and hands the handler an `AuthUser` extension
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        warn!(path = %request.uri().path(), "Unauthorized request - no bearer token");
        return unauthorized();
    };

    let user_id = match validate_token(token, &state.config.jwt) {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, path = %request.uri().path(), "Invalid bearer token");
            return unauthorized();
        }
    };

    match state.db.get_user(user_id) {
        Ok(Some(user)) => {
            debug!(user_id = user.id, path = %request.uri().path(), "Authenticated");
            request.extensions_mut().insert(AuthUser {
                id: user.id,
                email: user.email,
            });
            next.run(request).await
        }
        Ok(None) => {
            warn!(user_id, path = %request.uri().path(), "Token for unknown user");
            unauthorized()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    // Build CORS layer before config moves into state
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    let state = Arc::new(AppState { db, config });

    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login));

    let protected_routes = Router::new()
        .route("/me", get(handlers::me))
        // Accounts
        .route(
            "/accounts",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route(
            "/accounts/:id",
            get(handlers::get_account)
                .put(handlers::update_account)
                .delete(handlers::delete_account),
        )
        // Categories
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/:id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/:id",
            get(handlers::get_transaction)
                .put(handlers::update_transaction)
                .delete(handlers::delete_transaction),
        )
        // Budgets
        .route(
            "/budgets",
            get(handlers::list_budgets).post(handlers::create_budget),
        )
        .route("/budgets/progress", get(handlers::budget_progress))
        .route(
            "/budgets/:id",
            get(handlers::get_budget)
                .put(handlers::update_budget)
                .delete(handlers::delete_budget),
        )
        // Summaries
        .route("/dashboard", get(handlers::dashboard))
        .route("/analytics", get(handlers::analytics))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = public_routes.merge(protected_routes);

    // Security headers
    let csp_value = HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'");

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ))
}

/// Start the server with the given configuration
pub async fn serve(db: Database, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Caller mistakes reported by the core library keep their message
        if let Some(core) = err.downcast_ref::<tally_core::Error>() {
            match core {
                tally_core::Error::InvalidArgument(msg)
                | tally_core::Error::InvalidData(msg)
                | tally_core::Error::Conflict(msg) => return Self::bad_request(msg),
                tally_core::Error::NotFound(msg) => return Self::not_found(msg),
                _ => {}
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
