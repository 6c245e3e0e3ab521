//! Coarse permission tiers and the role gate.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::auth::identity::Identity;
use crate::error::AppError;

/// Coarse permission tier attached to a user and embedded in tokens.
///
/// Stored in the database as its SCREAMING_SNAKE_CASE string value; the same
/// spelling is used in token claims and request bodies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role gate: succeeds iff an identity is attached and its role is in the
/// allow-list.
///
/// A missing identity is a defensive 401 (the auth gate should have rejected
/// the request already); a role outside the allow-list is a 403. Pure
/// function, reused by every role-gated route with its own allow-list.
pub fn check(identity: Option<&Identity>, allowed: &[Role]) -> Result<(), AppError> {
    let identity = identity.ok_or_else(AppError::unauthorized)?;
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(AppError::forbidden_insufficient_role())
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::{check, Role};
    use crate::auth::identity::Identity;
    use crate::error::AppError;

    fn identity(role: Role) -> Identity {
        Identity {
            subject_id: 7,
            email: "gate@example.test".to_string(),
            role,
            issued_at: OffsetDateTime::now_utc(),
            expires_at: None,
        }
    }

    #[test]
    fn test_role_in_allow_list_passes() {
        let id = identity(Role::Admin);
        assert!(check(Some(&id), &[Role::Admin]).is_ok());
        assert!(check(Some(&id), &[Role::User, Role::Admin]).is_ok());
    }

    #[test]
    fn test_role_outside_allow_list_is_forbidden() {
        let id = identity(Role::User);
        let err = check(Some(&id), &[Role::Admin]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[test]
    fn test_missing_identity_is_unauthorized() {
        let err = check(None, &[Role::Admin]).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_empty_allow_list_rejects_everyone() {
        let id = identity(Role::Admin);
        assert!(check(Some(&id), &[]).is_err());
    }

    #[test]
    fn test_role_serde_spelling() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "ADMIN");
        assert_eq!(
            serde_json::from_value::<Role>(serde_json::json!("USER")).unwrap(),
            Role::User
        );
        assert!(serde_json::from_value::<Role>(serde_json::json!("ROOT")).is_err());
    }
}
