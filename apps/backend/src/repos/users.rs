//! User repository functions (generic over ConnectionTrait).

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::auth::roles::Role;
use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// User domain model. Safe to serialize into responses: it never carries
/// the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// User plus stored password hash, for credential verification only.
#[derive(Debug, Clone)]
pub struct UserWithPassword {
    pub user: User,
    pub password_hash: String,
}

/// Fields required to insert a new user.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_user: NewUser<'_>,
) -> Result<User, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = users::ActiveModel {
        id: NotSet,
        name: Set(new_user.name.to_string()),
        email: Set(new_user.email.to_string()),
        password_hash: Set(new_user.password_hash.to_string()),
        role: Set(new_user.role),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active.insert(conn).await.map_err(map_db_err)?;
    Ok(User::from(model))
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<UserWithPassword>, DomainError> {
    let model = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(model.map(UserWithPassword::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let model = users::Entity::find_by_id(user_id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(model.map(User::from))
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<users::Model> for UserWithPassword {
    fn from(model: users::Model) -> Self {
        let password_hash = model.password_hash.clone();
        Self {
            user: User::from(model),
            password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::User;
    use crate::auth::roles::Role;

    #[test]
    fn test_user_serialization_has_no_password_hash() {
        let user = User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.test".to_string(),
            role: Role::User,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "USER");
    }
}
