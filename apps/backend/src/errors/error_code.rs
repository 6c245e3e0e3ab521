//! Error codes for the Inkpost backend API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses. Add new codes here; never pass ad-hoc strings
//! as error codes.

use core::fmt;

/// Centralized error codes for the Inkpost backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// Authenticated role is not in the route's allow-list
    InsufficientRole,
    /// Authenticated user is not the post's author
    NotPostOwner,

    // Request Validation
    /// Login credentials did not match
    InvalidCredentials,
    /// Invalid post ID provided
    InvalidPostId,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Post not found
    PostNotFound,
    /// User not found
    UserNotFound,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    // Business Logic Conflicts
    /// Unique email constraint
    UniqueEmail,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
            Self::NotPostOwner => "NOT_POST_OWNER",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidPostId => "INVALID_POST_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// All codes, for exhaustiveness checks in tests.
    pub const fn all() -> &'static [ErrorCode] {
        &[
            Self::Unauthorized,
            Self::UnauthorizedMissingBearer,
            Self::UnauthorizedInvalidJwt,
            Self::UnauthorizedExpiredJwt,
            Self::Forbidden,
            Self::InsufficientRole,
            Self::NotPostOwner,
            Self::InvalidCredentials,
            Self::InvalidPostId,
            Self::ValidationError,
            Self::BadRequest,
            Self::PostNotFound,
            Self::UserNotFound,
            Self::RecordNotFound,
            Self::UniqueEmail,
            Self::Conflict,
            Self::DbError,
            Self::DbUnavailable,
            Self::Internal,
            Self::ConfigError,
        ]
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ErrorCode;

    #[test]
    fn test_error_code_strings_are_unique() {
        let mut seen = HashSet::new();
        for code in ErrorCode::all() {
            assert!(
                seen.insert(code.as_str()),
                "duplicate error code string: {}",
                code.as_str()
            );
        }
    }

    #[test]
    fn test_error_code_strings_are_screaming_snake_case() {
        for code in ErrorCode::all() {
            let s = code.as_str();
            assert!(!s.is_empty());
            assert!(
                s.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "not SCREAMING_SNAKE_CASE: {s}"
            );
        }
    }
}
