use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::ApiResponse;
use crate::models::materials::requests::{MaterialListParams, MaterialListQuery};
use crate::services::error_response;

pub async fn list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    query: MaterialListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_materials_with_pagination(MaterialListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(error_response(&e, "查询资料列表失败")),
    }
}
