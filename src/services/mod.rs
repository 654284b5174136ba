pub mod activities;
pub mod auth;
pub mod files;
pub mod materials;
pub mod submissions;
pub mod users;

pub use activities::ActivityService;
pub use auth::AuthService;
pub use files::FileService;
pub use materials::MaterialService;
pub use submissions::SubmissionService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::LmsError;
use crate::models::ApiResponse;
use crate::object_store::ObjectStore;
use crate::storage::Storage;

/// 领域错误对应的 HTTP 状态码
pub(crate) fn status_for(err: &LmsError) -> StatusCode {
    match err {
        LmsError::Validation(_) | LmsError::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
        LmsError::NotFound(_) => StatusCode::NOT_FOUND,
        LmsError::Authentication(_) => StatusCode::UNAUTHORIZED,
        LmsError::Authorization(_) => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 将领域错误转换为响应；数据库与对象存储故障记录日志，只向调用方返回通用提示
pub(crate) fn error_response(err: &LmsError, context: &str) -> HttpResponse {
    if err.is_upstream() {
        tracing::error!("{}: {}", context, err);
    } else {
        tracing::debug!("{}: {}", context, err);
    }
    HttpResponse::build(status_for(err)).json(ApiResponse::from_error(err))
}

// 从 app_data 中取出启动时注册的共享组件
fn shared<T: ?Sized + 'static>(request: &HttpRequest, name: &str) -> Arc<T> {
    request
        .app_data::<web::Data<Arc<T>>>()
        .unwrap_or_else(|| panic!("{name} not found in app data"))
        .get_ref()
        .clone()
}

pub(crate) fn storage_of(request: &HttpRequest) -> Arc<dyn Storage> {
    shared::<dyn Storage>(request, "Storage")
}

pub(crate) fn object_store_of(request: &HttpRequest) -> Arc<dyn ObjectStore> {
    shared::<dyn ObjectStore>(request, "ObjectStore")
}

pub(crate) fn cache_of(request: &HttpRequest) -> Arc<dyn ObjectCache> {
    shared::<dyn ObjectCache>(request, "ObjectCache")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&LmsError::validation("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&LmsError::invalid_timestamp("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&LmsError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&LmsError::authorization("x")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&LmsError::file_operation("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
