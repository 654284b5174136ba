use actix_web::{HttpResponse, Result as ActixResult};

use super::status::{Attempt, DeadlinePolicy, evaluate, initial_state};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::activities::entities::StatusView;
use crate::models::activities::requests::EvaluateStatusRequest;
use crate::models::activities::responses::EvaluateStatusResponse;
use crate::services::error_response;
use crate::utils::timestamp::parse_optional;

/// 按原始 RFC 3339 输入预览状态，不读写存储
pub fn preview(req: &EvaluateStatusRequest) -> Result<EvaluateStatusResponse> {
    let policy = DeadlinePolicy::parse(req.deadline.as_deref(), req.late_accepted)?;
    let attempt = Attempt::parse(req.submitted, req.submitted_at.as_deref())?;
    let now = parse_optional(req.now.as_deref())?.unwrap_or_else(chrono::Utc::now);

    Ok(EvaluateStatusResponse {
        status: StatusView::from(evaluate(&policy, now, attempt)),
        initial_state: initial_state(&policy, now),
        evaluated_at: now,
    })
}

pub async fn evaluate_status(req: EvaluateStatusRequest) -> ActixResult<HttpResponse> {
    match preview(&req) {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "计算成功"))),
        Err(e) => Ok(error_response(&e, "状态计算失败")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activities::entities::ActivityStatus;
    use crate::models::submissions::entities::SubmissionState;

    fn request(deadline: Option<&str>, submitted_at: Option<&str>, now: &str) -> EvaluateStatusRequest {
        EvaluateStatusRequest {
            deadline: deadline.map(str::to_string),
            late_accepted: true,
            submitted: false,
            submitted_at: submitted_at.map(str::to_string),
            now: Some(now.to_string()),
        }
    }

    #[test]
    fn test_preview_missed_and_late() {
        let missed = preview(&request(Some("2024-01-10T00:00:00Z"), None, "2024-01-11T00:00:00Z"))
            .unwrap();
        assert_eq!(missed.status.status, ActivityStatus::Missed);
        assert_eq!(missed.initial_state, SubmissionState::Late);

        let late = preview(&request(
            Some("2024-01-10T00:00:00Z"),
            Some("2024-01-11T00:00:00Z"),
            "2024-01-12T00:00:00Z",
        ))
        .unwrap();
        assert_eq!(late.status.status, ActivityStatus::SubmittedLate);
    }

    #[test]
    fn test_preview_rejects_malformed_input() {
        let err = preview(&request(Some("2024-13-45"), None, "2024-01-11T00:00:00Z")).unwrap_err();
        assert_eq!(err.code(), "E008");
        let err = preview(&request(None, None, "yesterday")).unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[actix_web::test]
    async fn test_evaluate_status_returns_bad_request_for_bad_timestamp() {
        let resp = evaluate_status(request(Some("soon"), None, "2024-01-11T00:00:00Z"))
            .await
            .unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
