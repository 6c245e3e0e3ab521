//! Post routes.
//!
//! Reads are public. Creation requires authentication. Update and delete run
//! the full gate pipeline: auth gate (Identity extractor) → role gate
//! (ADMIN allow-list) → handler loads the post → ownership check → mutation.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::auth::identity::Identity;
use crate::auth::roles::{self, Role};
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{PostId, ValidatedJson};
use crate::services::posts as post_service;
use crate::state::app_state::AppState;
use crate::web::Envelope;

/// Allow-list for mutating post operations.
const POST_MUTATION_ROLES: &[Role] = &[Role::Admin];

#[derive(Debug, Deserialize)]
pub struct PostBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

fn validate_post_body(body: &PostBody) -> Result<(), AppError> {
    if body.title.trim().is_empty() {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "Title cannot be empty",
        ));
    }
    if body.content.trim().is_empty() {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "Content cannot be empty",
        ));
    }
    Ok(())
}

async fn list_posts(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let posts = post_service::list_posts(db).await?;
    Ok(HttpResponse::Ok().json(Envelope::new("Posts retrieved successfully", posts)))
}

async fn get_post(
    post_id: PostId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let post = post_service::get_post(db, post_id.0).await?;
    Ok(HttpResponse::Ok().json(Envelope::new("Post retrieved successfully", post)))
}

async fn create_post(
    identity: Identity,
    body: ValidatedJson<PostBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    validate_post_body(&body)?;

    let db = require_db(&app_state)?;
    let post = post_service::create_post(db, &identity, &body.title, &body.content).await?;
    Ok(HttpResponse::Created().json(Envelope::new("Post created successfully", post)))
}

async fn update_post(
    identity: Identity,
    post_id: PostId,
    body: ValidatedJson<PostBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    // Role gate runs before any store access.
    roles::check(Some(&identity), POST_MUTATION_ROLES)?;

    let body = body.into_inner();
    validate_post_body(&body)?;

    let db = require_db(&app_state)?;
    let post =
        post_service::update_post(db, &identity, post_id.0, &body.title, &body.content).await?;
    Ok(HttpResponse::Ok().json(Envelope::new("Post updated successfully", post)))
}

async fn delete_post(
    identity: Identity,
    post_id: PostId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    roles::check(Some(&identity), POST_MUTATION_ROLES)?;

    let db = require_db(&app_state)?;
    let post = post_service::delete_post(db, &identity, post_id.0).await?;
    Ok(HttpResponse::Ok().json(Envelope::new("Post deleted successfully", post)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/posts")
            .route(web::get().to(list_posts))
            .route(web::post().to(create_post)),
    );
    cfg.service(
        web::resource("/api/posts/{post_id}")
            .route(web::get().to(get_post))
            .route(web::put().to(update_post))
            .route(web::delete().to(delete_post)),
    );
}
