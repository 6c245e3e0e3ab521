//! Registration and login flows.

use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::auth::jwt::mint_access_token;
use crate::auth::password;
use crate::auth::roles::Role;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, NewUser, User};
use crate::state::security_config::SecurityConfig;

/// Validated registration input. Email is expected pre-normalized
/// (see [`normalize_email`]).
#[derive(Debug)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Canonical email spelling used for the unique column: trimmed, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Register a new user and issue their first token.
///
/// The duplicate-email pre-check gives a clean 409 for the common case; a
/// concurrent insert racing past it still ends up a 409 via the unique
/// constraint mapping in `db_errors`.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    input: RegisterInput,
) -> Result<(User, String), AppError> {
    if users::find_by_email(conn, &input.email).await?.is_some() {
        return Err(AppError::conflict(
            ErrorCode::UniqueEmail,
            "Email already exists",
        ));
    }

    let password_hash = password::hash_password(&input.password)?;

    let user = users::create(
        conn,
        NewUser {
            name: &input.name,
            email: &input.email,
            password_hash: &password_hash,
            role: input.role,
        },
    )
    .await?;

    let token = mint_access_token(
        user.id,
        &user.email,
        user.role,
        SystemTime::now(),
        security,
    )?;

    info!(
        user_id = user.id,
        email = %Redacted(&user.email),
        role = %user.role,
        "user registered"
    );

    Ok((user, token))
}

/// Verify credentials and issue a token.
///
/// Unknown email and wrong password produce the same error so the response
/// does not reveal which part was wrong.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    email: &str,
    password_plaintext: &str,
) -> Result<(User, String), AppError> {
    let Some(found) = users::find_by_email(conn, email).await? else {
        return Err(AppError::invalid_credentials());
    };

    if !password::verify_password(password_plaintext, &found.password_hash) {
        return Err(AppError::invalid_credentials());
    }

    let user = found.user;
    let token = mint_access_token(
        user.id,
        &user.email,
        user.role,
        SystemTime::now(),
        security,
    )?;

    info!(user_id = user.id, "login successful");

    Ok((user, token))
}

#[cfg(test)]
mod tests {
    use super::normalize_email;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
        assert_eq!(normalize_email("plain@example.test"), "plain@example.test");
    }
}
