use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Post ID extracted from the route path parameter.
///
/// Validates shape only (a positive integer); existence is checked inside
/// the handler flow so that the 404/403 ordering stays with the ownership
/// check.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct PostId(pub i64);

impl FromRequest for PostId {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(parse_post_id(req))
    }
}

fn parse_post_id(req: &HttpRequest) -> Result<PostId, AppError> {
    let raw = req.match_info().get("post_id").ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidPostId, "Missing post_id parameter")
    })?;

    let post_id = raw.parse::<i64>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidPostId, format!("Invalid post id: {raw}"))
    })?;

    if post_id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidPostId,
            format!("Post id must be positive, got: {post_id}"),
        ));
    }

    Ok(PostId(post_id))
}
