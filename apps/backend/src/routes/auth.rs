//! Public authentication routes: register and login.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::roles::Role;
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::repos::users::User;
use crate::services::auth::{self, normalize_email, RegisterInput};
use crate::state::app_state::AppState;
use crate::web::Envelope;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Optional; defaults to USER. An unknown value fails body parsing.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
struct AuthData {
    user: User,
    token: String,
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "Invalid email address",
        ));
    }
    Ok(())
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let email = normalize_email(&body.email);
    validate_email(&email)?;
    if body.name.trim().is_empty() {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "Name cannot be empty",
        ));
    }
    if body.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }

    let db = require_db(&app_state)?;
    let (user, token) = auth::register(
        db,
        &app_state.security,
        RegisterInput {
            name: body.name.trim().to_string(),
            email,
            password: body.password,
            role: body.role.unwrap_or(Role::User),
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(Envelope::new(
        "User created successfully",
        AuthData { user, token },
    )))
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let email = normalize_email(&body.email);
    validate_email(&email)?;

    let db = require_db(&app_state)?;
    let (user, token) = auth::login(db, &app_state.security, &email, &body.password).await?;

    Ok(HttpResponse::Ok().json(Envelope::new(
        "Login successful",
        AuthData { user, token },
    )))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/register").route(web::post().to(register)));
    cfg.service(web::resource("/api/auth/login").route(web::post().to(login)));
}
