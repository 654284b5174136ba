use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, CurrentUser};
use crate::models::materials::requests::{
    CreateMaterialRequest, MaterialListParams, UpdateMaterialRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MaterialService 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// 列出资料
pub async fn list_materials(
    req: HttpRequest,
    query: web::Query<MaterialListParams>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_materials(&req, query.into_inner())
        .await
}

// 创建资料
pub async fn create_material(
    req: HttpRequest,
    user: CurrentUser,
    body: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_material(&req, &user.0, body.into_inner())
        .await
}

// 获取资料详情
pub async fn get_material(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_material(&req, path.0).await
}

// 更新资料
pub async fn update_material(
    req: HttpRequest,
    user: CurrentUser,
    path: SafeIDI64,
    body: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, &user.0, path.0, body.into_inner())
        .await
}

// 删除资料
pub async fn delete_material(
    req: HttpRequest,
    user: CurrentUser,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .delete_material(&req, &user.0, path.0)
        .await
}

// 配置路由
pub fn configure_material_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出资料 - 所有登录用户可访问
                    .route(web::get().to(list_materials))
                    // 创建资料 - 仅教职人员和管理员
                    .route(
                        web::post()
                            .to(create_material)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_material))
                    // 修改与删除 - 教职人员和管理员，业务层再校验创建者
                    .route(
                        web::put()
                            .to(update_material)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_material)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
