use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 已上传文件的元数据，内容保存在对象存储中
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct StoredFile {
    /// 对象存储中的相对路径，形如 2025/03/<uuid>.pdf
    pub file_ref: String,
    pub original_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub user_id: i64,
}

// 写入存储层的新文件记录
#[derive(Debug, Clone)]
pub struct NewStoredFile {
    pub file_ref: String,
    pub original_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub user_id: i64,
}
