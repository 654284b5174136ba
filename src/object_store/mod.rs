//! 对象存储
//!
//! 上传的文件以相对路径（file_ref）保存，数据库只登记元数据。

pub mod local;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};

use crate::config::UploadConfig;
use crate::errors::Result;

pub use local::LocalObjectStore;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 写入对象，返回其引用
    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<String>;
    /// 读取对象，不存在时返回 None
    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>>;
    /// 删除对象，返回是否确实删除了内容
    async fn delete(&self, path: &str) -> Result<bool>;
    /// 对外可访问的地址
    fn url(&self, path: &str) -> String;
}

/// 按上传时间分目录的新对象路径：`<yyyy>/<mm>/<uuid><ext>`
pub fn object_path(extension: &str, now: DateTime<Utc>) -> String {
    format!(
        "{:04}/{:02}/{}{}",
        now.year(),
        now.month(),
        uuid::Uuid::new_v4().simple(),
        extension.to_ascii_lowercase()
    )
}

pub fn create_object_store(config: &UploadConfig) -> Arc<dyn ObjectStore> {
    Arc::new(LocalObjectStore::new(&config.dir, &config.public_base_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::SafeFileRef;
    use chrono::TimeZone;

    #[test]
    fn test_object_path_layout() {
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
        let path = object_path(".PDF", now);
        assert!(path.starts_with("2025/03/"));
        assert!(path.ends_with(".pdf"));
        assert!(SafeFileRef::is_safe(&path));
    }
}
