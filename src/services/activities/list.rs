use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{ActivityService, assemble};
use crate::errors::Result;
use crate::models::activities::responses::ActivityListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;

async fn build(storage: &Arc<dyn Storage>, user_id: i64) -> Result<ActivityListResponse> {
    let materials = storage.list_all_materials().await?;
    let submissions = storage.list_user_submissions(user_id).await?;
    let now = chrono::Utc::now();

    Ok(ActivityListResponse {
        user_id,
        items: assemble(user_id, materials, submissions, now),
        generated_at: now,
    })
}

pub async fn list_activities(
    service: &ActivityService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match build(&storage, user_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(error_response(&e, "查询活动列表失败")),
    }
}

pub async fn list_activities_for_user(
    service: &ActivityService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "用户不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, "查询用户失败")),
    }

    list_activities(service, request, user_id).await
}
