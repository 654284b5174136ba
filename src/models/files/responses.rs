use serde::Serialize;
use ts_rs::TS;

use super::entities::StoredFile;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FileUploadResponse {
    pub file_ref: String,
    /// 可直接访问的下载地址
    pub url: String,
    pub file_name: String,
    /// 文件大小(字节)
    pub size: i64,
    pub content_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl FileUploadResponse {
    pub fn new(file: StoredFile, url: String) -> Self {
        Self {
            file_ref: file.file_ref,
            url,
            file_name: file.original_name,
            size: file.file_size,
            content_type: file.content_type,
            uploaded_at: file.uploaded_at,
        }
    }
}
