use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialService, load_material};
use crate::models::ApiResponse;

pub async fn get_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_material(&storage, material_id).await {
        Ok(material) => Ok(HttpResponse::Ok().json(ApiResponse::success(material, "查询成功"))),
        Err(resp) => Ok(resp),
    }
}
