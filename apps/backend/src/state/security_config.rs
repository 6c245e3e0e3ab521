use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Default access-token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for JWT security settings.
///
/// Built once at startup and held immutably in `AppState` for the process
/// lifetime; rotating the secret invalidates all outstanding tokens.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Access-token lifetime. `None` issues tokens without an expiry claim
    /// and accepts tokens that lack one.
    pub token_ttl: Option<Duration>,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret and the
    /// default token lifetime.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: Some(DEFAULT_TOKEN_TTL),
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Option<Duration>) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
