//! The verified identity extracted from a request's token.

use serde::Serialize;
use time::OffsetDateTime;

use crate::auth::jwt::Claims;
use crate::auth::roles::Role;

/// Verified claims for the current request.
///
/// Ephemeral: reconstructed per request by token verification, never
/// persisted, and threaded explicitly to handlers (no hidden request
/// mutation). Holding an `Identity` does not guarantee the subject still
/// exists; a deleted user's token stays valid until it expires.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    /// The user id the token asserts ownership of
    pub subject_id: i64,
    pub email: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.id,
            email: claims.email,
            role: claims.role,
            issued_at: OffsetDateTime::from_unix_timestamp(claims.iat)
                .unwrap_or(OffsetDateTime::UNIX_EPOCH),
            expires_at: claims
                .exp
                .and_then(|exp| OffsetDateTime::from_unix_timestamp(exp).ok()),
        }
    }
}
