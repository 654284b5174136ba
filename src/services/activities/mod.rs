pub mod assemble;
pub mod list;
pub mod preview;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::activities::requests::EvaluateStatusRequest;
use crate::storage::Storage;

pub use assemble::assemble;
pub use status::{Attempt, DeadlinePolicy, evaluate, initial_state};

pub struct ActivityService {
    storage: Option<Arc<dyn Storage>>,
}

impl ActivityService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_of(request),
        }
    }

    /// 当前用户的活动列表
    pub async fn list_my_activities(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_activities(self, request, user_id).await
    }

    /// 教职人员查看指定学生的活动列表
    pub async fn list_user_activities(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_activities_for_user(self, request, user_id).await
    }

    pub async fn evaluate_status(&self, req: EvaluateStatusRequest) -> ActixResult<HttpResponse> {
        preview::evaluate_status(req).await
    }
}
