use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::user_cache_key;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 处理用户登出
/// 清除客户端的 refresh_token cookie，并移除缓存中的用户信息
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    service.get_cache(request).remove(&user_cache_key(user_id)).await;

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    tracing::info!("User {} logged out", user_id);
    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::success_empty("登出成功")))
}
