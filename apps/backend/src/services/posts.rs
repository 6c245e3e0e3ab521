//! Post CRUD flows, including the ownership check for mutations.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::auth::identity::Identity;
use crate::error::AppError;
use crate::repos::posts::{self, NewPost, Post, PostUpdate, PostWithAuthor};
use crate::repos::users;

/// Ownership check: only the creator may mutate a post.
///
/// Callers must confirm the post exists (404) before invoking this, so that
/// a missing id and a foreign post are reported distinctly.
fn check_owner(post: &Post, identity: &Identity) -> Result<(), AppError> {
    if post.author_id != identity.subject_id {
        return Err(AppError::forbidden_not_owner());
    }
    Ok(())
}

pub async fn create_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity: &Identity,
    title: &str,
    content: &str,
) -> Result<PostWithAuthor, AppError> {
    let post = posts::create(
        conn,
        NewPost {
            title,
            content,
            author_id: identity.subject_id,
        },
    )
    .await?;

    info!(post_id = post.id, author_id = post.author_id, "post created");

    let author = users::find_by_id(conn, identity.subject_id).await?;
    Ok(PostWithAuthor { post, author })
}

pub async fn list_posts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<PostWithAuthor>, AppError> {
    Ok(posts::find_all_with_authors(conn).await?)
}

pub async fn get_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<PostWithAuthor, AppError> {
    posts::find_by_id_with_author(conn, post_id)
        .await?
        .ok_or_else(|| AppError::post_not_found(post_id))
}

pub async fn update_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity: &Identity,
    post_id: i64,
    title: &str,
    content: &str,
) -> Result<Post, AppError> {
    let post = posts::find_by_id(conn, post_id)
        .await?
        .ok_or_else(|| AppError::post_not_found(post_id))?;

    check_owner(&post, identity)?;

    let updated = posts::update(conn, post_id, PostUpdate { title, content }).await?;
    info!(post_id = updated.id, "post updated");
    Ok(updated)
}

/// Delete a post, returning the deleted record.
pub async fn delete_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity: &Identity,
    post_id: i64,
) -> Result<Post, AppError> {
    let post = posts::find_by_id(conn, post_id)
        .await?
        .ok_or_else(|| AppError::post_not_found(post_id))?;

    check_owner(&post, identity)?;

    posts::delete(conn, post_id).await?;
    info!(post_id = post.id, "post deleted");
    Ok(post)
}
