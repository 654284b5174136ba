use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::ApiResponse;
use crate::models::submissions::requests::{SubmissionListParams, SubmissionListQuery};
use crate::models::submissions::responses::MySubmissionsResponse;
use crate::services::error_response;

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_submissions_with_pagination(SubmissionListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(error_response(&e, "查询提交列表失败")),
    }
}

pub async fn list_my_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    owner_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_user_submissions(owner_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MySubmissionsResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(error_response(&e, "查询我的提交失败")),
    }
}
