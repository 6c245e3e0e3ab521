//! Post repository functions (generic over ConnectionTrait).

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};
use serde::Serialize;
use time::OffsetDateTime;

use crate::entities::posts;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::users::User;

/// Post domain model. `author_id` is set at creation and never updated;
/// it is the ownership relation used for mutation authorization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Post with its author attached, for read endpoints. The author is `None`
/// when the owning user has since been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: Option<User>,
}

#[derive(Debug)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author_id: i64,
}

#[derive(Debug)]
pub struct PostUpdate<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_post: NewPost<'_>,
) -> Result<Post, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = posts::ActiveModel {
        id: NotSet,
        title: Set(new_post.title.to_string()),
        content: Set(new_post.content.to_string()),
        author_id: Set(new_post.author_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active.insert(conn).await.map_err(map_db_err)?;
    Ok(Post::from(model))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<Post>, DomainError> {
    let model = posts::Entity::find_by_id(post_id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(model.map(Post::from))
}

pub async fn find_by_id_with_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<PostWithAuthor>, DomainError> {
    let found = posts::Entity::find_by_id(post_id)
        .find_also_related(crate::entities::users::Entity)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(found.map(PostWithAuthor::from))
}

pub async fn find_all_with_authors<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<PostWithAuthor>, DomainError> {
    let found = posts::Entity::find()
        .find_also_related(crate::entities::users::Entity)
        .order_by_asc(posts::Column::Id)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(found.into_iter().map(PostWithAuthor::from).collect())
}

/// Update title and content. `author_id` is deliberately untouchable here.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    patch: PostUpdate<'_>,
) -> Result<Post, DomainError> {
    let model = posts::Entity::find_by_id(post_id)
        .one(conn)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Post, format!("Post {post_id} not found"))
        })?;

    let mut active: posts::ActiveModel = model.into();
    active.title = Set(patch.title.to_string());
    active.content = Set(patch.content.to_string());
    active.updated_at = Set(OffsetDateTime::now_utc());

    let model = active.update(conn).await.map_err(map_db_err)?;
    Ok(Post::from(model))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<(), DomainError> {
    posts::Entity::delete_by_id(post_id)
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    Ok(())
}

impl From<posts::Model> for Post {
    fn from(model: posts::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author_id: model.author_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<(posts::Model, Option<crate::entities::users::Model>)> for PostWithAuthor {
    fn from((post, author): (posts::Model, Option<crate::entities::users::Model>)) -> Self {
        Self {
            post: Post::from(post),
            author: author.map(User::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::{Post, PostWithAuthor};

    fn post() -> Post {
        Post {
            id: 3,
            title: "Title".to_string(),
            content: "Body".to_string(),
            author_id: 7,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_post_with_author_flattens() {
        let body = PostWithAuthor {
            post: post(),
            author: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        // Post fields sit at the top level next to the author key.
        assert_eq!(json["id"], 3);
        assert_eq!(json["author_id"], 7);
        assert!(json["author"].is_null());
    }
}
