use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::identity::Identity;
use crate::auth::roles::Role;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Claims included in our backend-issued access tokens.
///
/// The shape is strict: a payload with missing fields, wrong types or an
/// unknown role fails deserialization and is treated as an invalid token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id (token subject)
    pub id: i64,
    pub role: Role,
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch); absent when expiry is disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Mint a signed access token for the given user.
///
/// The expiry claim is driven by `security.token_ttl`; with `None` the token
/// never expires.
pub fn mint_access_token(
    user_id: i64,
    email: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let exp = security.token_ttl.map(|ttl| iat + ttl.as_secs() as i64);

    let claims = Claims {
        id: user_id,
        role,
        email: email.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return the Identity it asserts.
///
/// Errors:
/// - Expired token → `AppError::unauthorized_expired_jwt()`
/// - Bad signature or malformed payload → `AppError::unauthorized_invalid_jwt()`
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Identity, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = true;
    if security.token_ttl.is_none() {
        // Expiry disabled: tokens are allowed to omit the exp claim. Ones
        // that carry it are still checked against it.
        validation.set_required_spec_claims::<&str>(&[]);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| Identity::from(data.claims))
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}
