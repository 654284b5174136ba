use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::ObjectStore;
use crate::errors::{LmsError, Result};
use crate::utils::SafeFileRef;

/// 本地磁盘对象存储，根目录为 upload.dir
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl AsRef<Path>, public_base_url: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        if !SafeFileRef::is_safe(path) {
            return Err(LmsError::validation(format!("Invalid object path: {path}")));
        }
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<String> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                LmsError::file_operation(format!("创建目录 {} 失败: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(&full, bytes)
            .await
            .map_err(|e| LmsError::file_operation(format!("写入对象 {path} 失败: {e}")))?;
        debug!("Stored object {}", path);
        Ok(path.to_string())
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full = self.resolve(path)?;
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LmsError::file_operation(format!(
                "读取对象 {path} 失败: {e}"
            ))),
        }
    }

    async fn delete(&self, path: &str) -> Result<bool> {
        let full = self.resolve(path)?;
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(LmsError::file_operation(format!(
                "删除对象 {path} 失败: {e}"
            ))),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lms-object-store-{name}-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let root = temp_root("roundtrip");
        let store = LocalObjectStore::new(&root, "/api/v1/files/");

        let path = "2025/03/abc.txt";
        assert_eq!(store.put(path, b"hello".to_vec()).await.unwrap(), path);
        assert_eq!(store.get(path).await.unwrap().as_deref(), Some(&b"hello"[..]));
        assert_eq!(store.url(path), "/api/v1/files/2025/03/abc.txt");

        assert!(store.delete(path).await.unwrap());
        assert!(!store.delete(path).await.unwrap());
        assert_eq!(store.get(path).await.unwrap(), None);

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let store = LocalObjectStore::new(temp_root("traversal"), "/files");
        let err = store.get("../secret.txt").await.unwrap_err();
        assert_eq!(err.code(), "E005");
    }
}
