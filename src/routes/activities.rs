use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, CurrentUser};
use crate::models::activities::requests::EvaluateStatusRequest;
use crate::models::users::entities::UserRole;
use crate::services::ActivityService;
use crate::utils::SafeUserIdI64;

// 懒加载的全局 ActivityService 实例
static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);

// 当前用户的活动列表
pub async fn list_my_activities(req: HttpRequest, user: CurrentUser) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.list_my_activities(&req, user.id()).await
}

// 指定用户的活动列表
pub async fn list_user_activities(
    req: HttpRequest,
    path: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.list_user_activities(&req, path.0).await
}

// 状态预览
pub async fn evaluate_status(body: web::Json<EvaluateStatusRequest>) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.evaluate_status(body.into_inner()).await
}

// 配置路由
pub fn configure_activity_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/activities")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_my_activities))
            .route("/evaluate", web::post().to(evaluate_status))
            .service(
                web::resource("/users/{user_id}")
                    .route(web::get().to(list_user_activities))
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
            ),
    );
}
