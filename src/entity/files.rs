//! 文件实体

use sea_orm::entity::prelude::*;

use crate::errors::Result as LmsResult;
use crate::utils::timestamp::from_unix;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub file_ref: String,
    pub original_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub uploaded_at: i64,
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_file(self) -> LmsResult<crate::models::files::entities::StoredFile> {
        use crate::models::files::entities::StoredFile;

        Ok(StoredFile {
            uploaded_at: from_unix(self.uploaded_at)?,
            file_ref: self.file_ref,
            original_name: self.original_name,
            file_size: self.file_size,
            content_type: self.content_type,
            user_id: self.user_id,
        })
    }
}
