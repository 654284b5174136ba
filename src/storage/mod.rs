use std::sync::Arc;

use crate::models::{
    files::entities::{NewStoredFile, StoredFile},
    materials::{
        entities::Material,
        requests::{MaterialChanges, MaterialListQuery, NewMaterial},
        responses::MaterialListResponse,
    },
    submissions::{
        entities::Submission,
        requests::{NewSubmission, SubmissionGrade, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
    users::{
        entities::User,
        requests::{NewUser, UserChanges, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 文件管理方法
    // 登记已写入对象存储的文件
    async fn create_file(&self, file: NewStoredFile) -> Result<StoredFile>;
    // 通过对象路径获取文件信息
    async fn get_file_by_ref(&self, file_ref: &str) -> Result<Option<StoredFile>>;
    // 删除文件记录
    async fn delete_file(&self, file_ref: &str) -> Result<bool>;

    /// 课程资料方法
    async fn create_material(&self, material: NewMaterial) -> Result<Material>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<Material>>;
    // 分页列出资料（最新上传在前）
    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse>;
    // 列出全部资料（最新上传在前），用于组装学习活动
    async fn list_all_materials(&self) -> Result<Vec<Material>>;
    async fn update_material(&self, id: i64, changes: MaterialChanges)
    -> Result<Option<Material>>;
    // 删除资料，关联提交保留并解除引用
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 提交管理方法
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 列出某用户的全部提交（最新在前）
    async fn list_user_submissions(&self, owner_id: i64) -> Result<Vec<Submission>>;
    // 写入评分
    async fn grade_submission(
        &self,
        id: i64,
        grade: SubmissionGrade,
    ) -> Result<Option<Submission>>;
    async fn delete_submission(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
