pub mod create;
pub mod delete;
pub mod detail;
pub mod grade;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListParams,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::ObjectStore;
use crate::services::error_response;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_of(request),
        }
    }

    pub(crate) fn get_object_store(&self, request: &HttpRequest) -> Arc<dyn ObjectStore> {
        super::object_store_of(request)
    }

    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        owner: &User,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, owner, req).await
    }

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }

    pub async fn list_my_submissions(
        &self,
        request: &HttpRequest,
        owner_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_my_submissions(self, request, owner_id).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        current_user: &User,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, current_user, submission_id).await
    }

    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        grader: &User,
        submission_id: i64,
        req: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, grader, submission_id, req).await
    }

    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        current_user: &User,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, current_user, submission_id).await
    }
}

/// 查询提交，不存在时直接给出 404 响应
pub(crate) async fn load_submission(
    storage: &Arc<dyn Storage>,
    submission_id: i64,
) -> Result<Submission, HttpResponse> {
    match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => Ok(submission),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Err(error_response(&e, "查询提交失败")),
    }
}
