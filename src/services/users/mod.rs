pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::{ObjectCache, user_cache_key};
use crate::models::users::requests::{UpdateUserRequest, UserListParams};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_of(request),
        }
    }

    // 用户信息变更后移除缓存，下一次请求重新从数据库加载
    pub(crate) async fn evict(&self, request: &HttpRequest, user_id: i64) {
        let cache: Arc<dyn ObjectCache> = super::cache_of(request);
        cache.remove(&user_cache_key(user_id)).await;
    }

    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, request, query).await
    }

    pub async fn get_user(&self, request: &HttpRequest, user_id: i64) -> ActixResult<HttpResponse> {
        get::get_user(self, request, user_id).await
    }

    pub async fn update_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
        update_data: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, request, user_id, update_data).await
    }

    pub async fn delete_user(
        &self,
        request: &HttpRequest,
        operator_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, request, operator_id, user_id).await
    }
}
