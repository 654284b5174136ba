//! 文件存储操作

use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Entity as Files, Model};
use crate::errors::{LmsError, Result};
use crate::models::files::entities::{NewStoredFile, StoredFile};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 登记文件记录
    pub async fn create_file_impl(&self, file: NewStoredFile) -> Result<StoredFile> {
        let model = ActiveModel {
            file_ref: Set(file.file_ref),
            original_name: Set(file.original_name),
            file_size: Set(file.file_size),
            content_type: Set(file.content_type),
            uploaded_at: Set(chrono::Utc::now().timestamp()),
            user_id: Set(file.user_id),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("登记文件记录失败: {e}")))?;

        result.into_file()
    }

    /// 通过对象路径获取文件
    pub async fn get_file_by_ref_impl(&self, file_ref: &str) -> Result<Option<StoredFile>> {
        let result = Files::find_by_id(file_ref.to_string())
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询文件失败: {e}")))?;

        result.map(Model::into_file).transpose()
    }

    /// 删除文件记录
    pub async fn delete_file_impl(&self, file_ref: &str) -> Result<bool> {
        let result = Files::delete_by_id(file_ref.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除文件记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
