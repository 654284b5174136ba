use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialService, can_manage, load_material};
use crate::models::materials::entities::MaterialKind;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    current_user: &User,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let material = match load_material(&storage, material_id).await {
        Ok(material) => material,
        Err(resp) => return Ok(resp),
    };

    if !can_manage(current_user, &material) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能删除自己创建的资料",
        )));
    }

    match storage.delete_material(material_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MaterialNotFound,
                "资料不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, "删除资料失败")),
    }

    // 资料已删除，文件清理失败只记录日志
    if material.kind == MaterialKind::File {
        let object_store = service.get_object_store(request);
        if let Err(e) = object_store.delete(&material.reference).await {
            tracing::warn!("Failed to delete object {}: {}", material.reference, e);
        }
        if let Err(e) = storage.delete_file(&material.reference).await {
            tracing::warn!("Failed to delete file record {}: {}", material.reference, e);
        }
    }

    tracing::info!("Material {} deleted by user {}", material_id, current_user.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("资料已删除")))
}
