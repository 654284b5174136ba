pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::materials::entities::Material;
use crate::models::materials::requests::{
    CreateMaterialRequest, MaterialListParams, UpdateMaterialRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::ObjectStore;
use crate::services::error_response;
use crate::storage::Storage;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
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

    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        query: MaterialListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, request, query).await
    }

    pub async fn create_material(
        &self,
        request: &HttpRequest,
        creator: &User,
        req: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_material(self, request, creator, req).await
    }

    pub async fn get_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_material(self, request, material_id).await
    }

    pub async fn update_material(
        &self,
        request: &HttpRequest,
        current_user: &User,
        material_id: i64,
        req: UpdateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_material(self, request, current_user, material_id, req).await
    }

    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        current_user: &User,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, request, current_user, material_id).await
    }
}

/// 查询资料，不存在时直接给出 404 响应
pub(crate) async fn load_material(
    storage: &Arc<dyn Storage>,
    material_id: i64,
) -> Result<Material, HttpResponse> {
    match storage.get_material_by_id(material_id).await {
        Ok(Some(material)) => Ok(material),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "资料不存在",
        ))),
        Err(e) => Err(error_response(&e, "查询资料失败")),
    }
}

/// 创建者或管理员可以修改、删除资料
pub(crate) fn can_manage(user: &User, material: &Material) -> bool {
    user.role == UserRole::Admin || material.created_by == user.id
}

/// 文件类资料引用的文件必须存在且由操作者本人上传
pub(crate) async fn check_file_reference(
    storage: &Arc<dyn Storage>,
    file_ref: &str,
    user_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_file_by_ref(file_ref).await {
        Ok(Some(file)) if file.user_id == user_id => Ok(()),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能引用自己上传的文件",
        ))),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "引用的文件不存在",
        ))),
        Err(e) => Err(error_response(&e, "查询文件失败")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::materials::entities::MaterialKind;
    use crate::models::users::entities::UserStatus;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_can_manage() {
        let material = Material {
            id: 1,
            title: "Week 1".into(),
            description: None,
            kind: MaterialKind::Link,
            reference: "https://example.com".into(),
            deadline: None,
            max_score: None,
            late_accepted: false,
            created_by: 2,
            uploaded_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert!(can_manage(&user(2, UserRole::Staff), &material));
        assert!(can_manage(&user(9, UserRole::Admin), &material));
        assert!(!can_manage(&user(3, UserRole::Staff), &material));
    }
}
