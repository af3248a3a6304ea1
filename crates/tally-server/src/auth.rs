//! Bearer token issue and validation

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::JwtConfig;

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued to.
    pub sub: String,
    /// The time the token was issued.
    pub iat: i64,
    /// The expiry time of the token.
    pub exp: i64,
}

/// The caller behind a validated token, attached to each protected request
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// Sign a token for `user_id` valid for the configured lifetime
pub fn issue_token(user_id: i64, config: &JwtConfig) -> jsonwebtoken::errors::Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + config.expiration_secs,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry, returning the user id in the subject
pub fn validate_token(token: &str, config: &JwtConfig) -> anyhow::Result<i64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    data.claims
        .sub
        .parse()
        .map_err(|_| anyhow::anyhow!("Token subject is not a user id"))
}
