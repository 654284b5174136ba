use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::path::Path;

use super::FileService;
use crate::config::AppConfig;
use crate::models::files::entities::NewStoredFile;
use crate::models::{ApiResponse, ErrorCode, files::responses::FileUploadResponse};
use crate::object_store::object_path;
use crate::services::error_response;
use crate::utils::{content_type_for, validate_magic_bytes};

/// 从客户端文件名中取出扩展名（带点、小写）
pub(crate) fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 去掉客户端可能附带的目录部分
pub(crate) fn display_name(file_name: &str) -> String {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("upload")
        .to_string()
}

/// 空文件和魔术字节与扩展名不符的内容都拒绝
pub(crate) fn check_content(data: &[u8], extension: &str) -> Result<(), &'static str> {
    if data.is_empty() {
        return Err("文件内容为空");
    }
    if !validate_magic_bytes(data, extension) {
        return Err("文件内容与扩展名不匹配");
    }
    Ok(())
}

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    user_id: i64,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    // 文件相关信息
    let mut original_name = String::new();
    let mut extension = String::new();
    let mut content: Option<Vec<u8>> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if content.is_some() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }

        original_name = display_name(
            content_disposition
                .and_then(|cd| cd.get_filename())
                .unwrap_or_default(),
        );

        // 提取扩展名并校验
        extension = extension_of(&original_name);
        if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            )));
        }

        let mut buffer: Vec<u8> = Vec::new();
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = chunk?;

            // 第一个 chunk 时验证魔术字节
            if first_chunk {
                first_chunk = false;
                if let Err(message) = check_content(&data, &extension) {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        message,
                    )));
                }
            }

            // 校验大小
            if buffer.len() + data.len() > max_size {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }
            buffer.extend_from_slice(&data);
        }

        // 没有任何 chunk 的字段不会经过上面的校验
        if first_chunk && let Err(message) = check_content(&buffer, &extension) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                message,
            )));
        }
        content = Some(buffer);
    }

    let Some(bytes) = content else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    };

    let object_store = service.get_object_store(req);
    let file_size = bytes.len() as i64;
    let path = object_path(&extension, chrono::Utc::now());

    let file_ref = match object_store.put(&path, bytes).await {
        Ok(file_ref) => file_ref,
        Err(e) => {
            tracing::error!("Failed to store upload {}: {}", path, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to store file",
                )),
            );
        }
    };

    let storage = service.get_storage(req);
    let new_file = NewStoredFile {
        file_ref: file_ref.clone(),
        original_name,
        file_size,
        content_type: content_type_for(&extension).to_string(),
        user_id,
    };

    match storage.create_file(new_file).await {
        Ok(file) => {
            tracing::info!("User {} uploaded {} ({} bytes)", user_id, file.file_ref, file.file_size);
            let url = object_store.url(&file.file_ref);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                FileUploadResponse::new(file, url),
                "File uploaded successfully",
            )))
        }
        Err(e) => {
            // 记录写入失败时回收已落盘的对象
            if let Err(cleanup) = object_store.delete(&file_ref).await {
                tracing::warn!("Failed to remove orphaned object {}: {}", file_ref, cleanup);
            }
            Ok(error_response(&e, "Failed to upload file"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Report.PDF"), ".pdf");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_check_content_rejects_empty_file() {
        assert_eq!(check_content(&[], ".txt"), Err("文件内容为空"));
        assert_eq!(check_content(&[], ".pdf"), Err("文件内容为空"));
        assert!(check_content(b"%PDF-1.7\n", ".pdf").is_ok());
        assert_eq!(check_content(b"plain text", ".png"), Err("文件内容与扩展名不匹配"));
    }

    #[test]
    fn test_display_name_strips_directories() {
        assert_eq!(display_name("C:\\Users\\me\\essay.docx"), "essay.docx");
        assert_eq!(display_name("../../etc/passwd"), "passwd");
        assert_eq!(display_name(""), "upload");
        assert_eq!(display_name("dir/"), "upload");
    }
}
