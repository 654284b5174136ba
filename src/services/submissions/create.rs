use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, SubsecRound, Utc};

use super::SubmissionService;
use crate::errors::{LmsError, Result};
use crate::models::materials::entities::Material;
use crate::models::submissions::requests::{CreateSubmissionRequest, NewSubmission};
use crate::models::submissions::responses::SubmissionReceipt;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::activities::{DeadlinePolicy, initial_state};
use crate::services::error_response;
use crate::services::materials::load_material;
use crate::utils::random_code::task_code;
use crate::utils::validate::validate_comment;

/// 请求中已校验的字段
#[derive(Debug, PartialEq)]
pub(crate) struct SubmissionInput {
    pub material_id: i64,
    pub file_ref: String,
    pub comment: Option<String>,
}

/// 先校验文件引用，再校验资料 id
pub(crate) fn validate_input(req: CreateSubmissionRequest) -> Result<SubmissionInput> {
    let file_ref = req
        .file_ref
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .ok_or_else(|| LmsError::validation("file_ref 不能为空"))?;

    let material_id = req
        .material_id
        .ok_or_else(|| LmsError::validation("material_id 不能为空"))?;
    if material_id <= 0 {
        return Err(LmsError::validation("material_id 必须为正整数"));
    }

    let comment = req
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if let Some(comment) = &comment {
        validate_comment(comment).map_err(LmsError::validation)?;
    }

    Ok(SubmissionInput {
        material_id,
        file_ref,
        comment,
    })
}

/// 按资料的截止策略构造提交记录
///
/// 提交时间先截断到秒（与存储精度一致），写入的状态与读取时的求值使用同一时刻。
pub fn new_submission(
    owner_id: i64,
    material: &Material,
    file_ref: String,
    comment: Option<String>,
    at: DateTime<Utc>,
) -> NewSubmission {
    let submitted_at = at.trunc_subsecs(0);
    NewSubmission {
        task_code: task_code(),
        owner_id,
        material_id: material.id,
        task_name: material.title.clone(),
        file_ref,
        comment,
        state: initial_state(&DeadlinePolicy::of(material), submitted_at),
        submitted_at,
    }
}

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    owner: &User,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let input = match validate_input(req) {
        Ok(input) => input,
        Err(e) => return Ok(error_response(&e, "提交参数无效")),
    };

    let material = match load_material(&storage, input.material_id).await {
        Ok(material) => material,
        Err(resp) => return Ok(resp),
    };

    // 只能提交自己上传的文件
    match storage.get_file_by_ref(&input.file_ref).await {
        Ok(Some(file)) if file.user_id == owner.id => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只能提交自己上传的文件",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "文件不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, "查询文件失败")),
    }

    let record = new_submission(
        owner.id,
        &material,
        input.file_ref,
        input.comment,
        Utc::now(),
    );

    match storage.create_submission(record).await {
        Ok(submission) => {
            tracing::info!(
                "Submission {} ({}) recorded for material {} as {}",
                submission.task_id,
                submission.task_code,
                material.id,
                submission.state
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SubmissionReceipt::from(&submission),
                "提交成功",
            )))
        }
        Err(e) => Ok(error_response(&e, "保存提交失败")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionState;

    fn request(material_id: Option<i64>, file_ref: Option<&str>) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            material_id,
            comment: Some("  first draft ".into()),
            file_ref: file_ref.map(str::to_string),
        }
    }

    #[test]
    fn test_file_ref_checked_first() {
        let err = validate_input(request(None, None)).unwrap_err();
        assert!(err.message().contains("file_ref"));
        let err = validate_input(request(Some(1), Some("   "))).unwrap_err();
        assert!(err.message().contains("file_ref"));
    }

    #[test]
    fn test_material_id_required() {
        let err = validate_input(request(None, Some("2024/01/a.pdf"))).unwrap_err();
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("material_id"));
        assert!(validate_input(request(Some(0), Some("2024/01/a.pdf"))).is_err());
    }

    fn late_material(deadline: DateTime<Utc>) -> Material {
        Material {
            id: 7,
            title: "Lab 2".into(),
            description: None,
            kind: crate::models::materials::entities::MaterialKind::Link,
            reference: "https://example.com/lab2".into(),
            deadline: Some(deadline),
            max_score: None,
            late_accepted: true,
            created_by: 1,
            uploaded_at: deadline,
            updated_at: deadline,
        }
    }

    #[test]
    fn test_new_submission_truncates_to_seconds() {
        let deadline = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let material = late_material(deadline);

        let just_after = deadline + chrono::Duration::milliseconds(300);
        let record = new_submission(2, &material, "a.pdf".into(), None, just_after);
        assert_eq!(record.submitted_at, deadline);
        assert_eq!(record.state, SubmissionState::OnTime);

        let later = deadline + chrono::Duration::milliseconds(1_300);
        let record = new_submission(2, &material, "a.pdf".into(), None, later);
        assert_eq!(record.state, SubmissionState::Late);
        assert_eq!(record.task_name, "Lab 2");
        assert_eq!(record.material_id, 7);
    }

    #[test]
    fn test_valid_input_is_trimmed() {
        let input = validate_input(request(Some(3), Some(" 2024/01/a.pdf "))).unwrap();
        assert_eq!(
            input,
            SubmissionInput {
                material_id: 3,
                file_ref: "2024/01/a.pdf".into(),
                comment: Some("first draft".into()),
            }
        );
    }
}
