use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_submission};
use crate::errors::{LmsError, Result};
use crate::models::submissions::requests::{GradeSubmissionRequest, SubmissionGrade};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::validate::{validate_comment, validate_remark};

/// 按资料满分校验评分，资料已删除时不设上限
pub(crate) fn prepare_grade(
    req: GradeSubmissionRequest,
    max_score: Option<f64>,
    graded_by: i64,
) -> Result<SubmissionGrade> {
    validate_remark(req.remark, max_score).map_err(LmsError::validation)?;

    let remark_comment = req
        .remark_comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if let Some(comment) = &remark_comment {
        validate_comment(comment).map_err(LmsError::validation)?;
    }

    Ok(SubmissionGrade {
        remark: req.remark,
        remark_comment,
        graded_by,
        graded_at: chrono::Utc::now(),
    })
}

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    grader: &User,
    submission_id: i64,
    req: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match load_submission(&storage, submission_id).await {
        Ok(submission) => submission,
        Err(resp) => return Ok(resp),
    };

    if submission.is_graded() {
        tracing::info!(
            "Submission {} already graded by user {:?}, overwriting remark",
            submission_id,
            submission.graded_by
        );
    }

    let max_score = match submission.material_id {
        Some(material_id) => match storage.get_material_by_id(material_id).await {
            Ok(material) => material.and_then(|m| m.max_score),
            Err(e) => return Ok(error_response(&e, "查询资料失败")),
        },
        None => None,
    };

    let grade = match prepare_grade(req, max_score, grader.id) {
        Ok(grade) => grade,
        Err(e) => return Ok(error_response(&e, "评分参数无效")),
    };

    match storage.grade_submission(submission_id, grade).await {
        Ok(Some(graded)) => {
            tracing::info!(
                "Submission {} graded {} by user {}",
                submission_id,
                graded.remark.unwrap_or_default(),
                grader.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "评分成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(error_response(&e, "保存评分失败")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(remark: f64) -> GradeSubmissionRequest {
        GradeSubmissionRequest {
            remark,
            remark_comment: Some(" well done ".into()),
        }
    }

    #[test]
    fn test_remark_respects_cap() {
        assert!(prepare_grade(request(100.0), Some(100.0), 1).is_ok());
        assert!(prepare_grade(request(100.5), Some(100.0), 1).is_err());
        assert!(prepare_grade(request(-1.0), None, 1).is_err());
        assert!(prepare_grade(request(250.0), None, 1).is_ok());
    }

    #[test]
    fn test_grade_fields() {
        let grade = prepare_grade(request(88.0), Some(100.0), 5).unwrap();
        assert_eq!(grade.remark, 88.0);
        assert_eq!(grade.remark_comment.as_deref(), Some("well done"));
        assert_eq!(grade.graded_by, 5);
    }
}
