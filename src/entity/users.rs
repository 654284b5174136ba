//! 用户实体

use sea_orm::entity::prelude::*;

use crate::errors::{LmsError, Result as LmsResult};
use crate::utils::timestamp::{from_unix, from_unix_opt};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub display_name: Option<String>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::materials::Entity")]
    Materials,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
    #[sea_orm(has_many = "super::files::Entity")]
    Files,
}

impl Related<super::materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Materials.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> LmsResult<crate::models::users::entities::User> {
        use crate::models::users::entities::{User, UserRole, UserStatus};

        Ok(User {
            role: self
                .role
                .parse::<UserRole>()
                .map_err(LmsError::serialization)?,
            status: self
                .status
                .parse::<UserStatus>()
                .map_err(LmsError::serialization)?,
            last_login: from_unix_opt(self.last_login)?,
            created_at: from_unix(self.created_at)?,
            updated_at: from_unix(self.updated_at)?,
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            display_name: self.display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserRole, UserStatus};

    fn row(role: &str) -> Model {
        Model {
            id: 4,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "hash".into(),
            role: role.into(),
            status: "active".into(),
            display_name: None,
            last_login: None,
            created_at: 1_704_844_800,
            updated_at: 1_704_844_800,
        }
    }

    #[test]
    fn test_into_user_maps_columns() {
        let user = row("staff").into_user().unwrap();
        assert_eq!(user.role, UserRole::Staff);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.created_at.timestamp(), 1_704_844_800);
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_into_user_rejects_unknown_role() {
        let err = row("teacher").into_user().unwrap_err();
        assert_eq!(err.code(), "E007");
    }
}
