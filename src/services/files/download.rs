use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::FileService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    file_ref: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let db_file = match storage.get_file_by_ref(&file_ref).await {
        Ok(Some(f)) => f,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => return Ok(error_response(&e, "File query failed")),
    };

    let object_store = service.get_object_store(request);
    let buf = match object_store.get(&db_file.file_ref).await {
        Ok(Some(buf)) => buf,
        Ok(None) => {
            tracing::warn!("Object {} is missing from the store", db_file.file_ref);
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "文件不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, "File read failed")),
    };

    // 使用数据库中的原始文件名
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, db_file.content_type.as_str()))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                db_file.original_name.replace('"', "")
            ),
        ))
        .body(buf))
}
