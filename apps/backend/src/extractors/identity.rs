//! Auth gate: the `Identity` extractor.
//!
//! Sole entry point establishing identity for a request. The per-request
//! state machine:
//!
//! - no Authorization header → 401
//! - header without a `Bearer <token>` shape → 401
//! - token fails verification (signature, shape, expiry) → 401
//! - otherwise the verified `Identity` is handed to the handler
//!
//! Purely a function of the token and the process-wide secret; no data-store
//! access. Role and ownership checks compose after this.

use actix_web::dev::Payload;
use actix_web::{http::header, web, FromRequest, HttpMessage, HttpRequest};

use crate::auth::identity::Identity;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::unauthorized_missing_bearer)?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    // Parse "Bearer <token>" format
    let parts: Vec<&str> = auth_value.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(AppError::unauthorized_missing_bearer());
    }

    let token = parts[1];
    if token.is_empty() {
        return Err(AppError::unauthorized_missing_bearer());
    }

    Ok(token.to_string())
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // An identity may already be attached (another extractor on the
            // same request, or a test fixture).
            if let Some(identity) = req.extensions().get::<Identity>() {
                return Ok(identity.clone());
            }

            let token = bearer_token(&req)?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let identity = verify_access_token(&token, &app_state.security)?;
            req.extensions_mut().insert(identity.clone());
            Ok(identity)
        })
    }
}
