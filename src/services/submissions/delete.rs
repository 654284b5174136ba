use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_submission};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    current_user: &User,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match load_submission(&storage, submission_id).await {
        Ok(submission) => submission,
        Err(resp) => return Ok(resp),
    };

    // 提交者本人或管理员可删除
    if submission.owner_id != current_user.id && current_user.role != UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能删除自己的提交",
        )));
    }

    match storage.delete_submission(submission_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, "删除提交失败")),
    }

    // 提交已删除，文件清理失败只记录日志
    let object_store = service.get_object_store(request);
    if let Err(e) = object_store.delete(&submission.file_ref).await {
        tracing::warn!("Failed to delete object {}: {}", submission.file_ref, e);
    }
    if let Err(e) = storage.delete_file(&submission.file_ref).await {
        tracing::warn!("Failed to delete file record {}: {}", submission.file_ref, e);
    }

    tracing::info!(
        "Submission {} deleted by user {}",
        submission_id,
        current_user.id
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提交已删除")))
}
