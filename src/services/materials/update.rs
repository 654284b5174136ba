use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialService, can_manage, check_file_reference, load_material};
use crate::errors::{LmsError, Result};
use crate::models::materials::entities::{Material, MaterialKind};
use crate::models::materials::requests::{MaterialChanges, UpdateMaterialRequest};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::timestamp::parse_rfc3339;
use crate::utils::validate::{validate_link, validate_max_score, validate_title};

/// 校验修改请求；返回的修改集只包含实际提供的字段
pub(crate) fn prepare_changes(
    req: UpdateMaterialRequest,
    current: &Material,
) -> Result<MaterialChanges> {
    let mut changes = MaterialChanges::default();

    if let Some(title) = req.title {
        let title = title.trim().to_string();
        validate_title(&title).map_err(LmsError::validation)?;
        changes.title = Some(title);
    }

    if let Some(description) = req.description {
        let description = description.trim().to_string();
        changes.description = Some((!description.is_empty()).then_some(description));
    }

    // 类型或引用任一变化时，按变化后的类型重新校验引用
    if req.kind.is_some() || req.reference.is_some() {
        let kind = req.kind.unwrap_or(current.kind);
        let reference = req
            .reference
            .map(|r| r.trim().to_string())
            .unwrap_or_else(|| current.reference.clone());
        match kind {
            MaterialKind::Link => validate_link(&reference).map_err(LmsError::validation)?,
            MaterialKind::File if reference.is_empty() => {
                return Err(LmsError::validation("文件类资料必须提供 file_ref"));
            }
            MaterialKind::File => {}
        }
        changes.kind = Some(kind);
        changes.reference = Some(reference);
    }

    match (req.clear_deadline, req.deadline) {
        (true, Some(_)) => {
            return Err(LmsError::validation(
                "clear_deadline 与 deadline 不能同时提供",
            ));
        }
        (true, None) => changes.deadline = Some(None),
        (false, Some(raw)) => changes.deadline = Some(Some(parse_rfc3339(&raw)?)),
        (false, None) => {}
    }

    match (req.clear_max_score, req.max_score) {
        (true, Some(_)) => {
            return Err(LmsError::validation(
                "clear_max_score 与 max_score 不能同时提供",
            ));
        }
        (true, None) => changes.max_score = Some(None),
        (false, Some(score)) => {
            validate_max_score(score).map_err(LmsError::validation)?;
            changes.max_score = Some(Some(score));
        }
        (false, None) => {}
    }

    changes.late_accepted = req.late_accepted;
    Ok(changes)
}

pub async fn update_material(
    service: &MaterialService,
    request: &HttpRequest,
    current_user: &User,
    material_id: i64,
    req: UpdateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let material = match load_material(&storage, material_id).await {
        Ok(material) => material,
        Err(resp) => return Ok(resp),
    };

    if !can_manage(current_user, &material) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能修改自己创建的资料",
        )));
    }

    let changes = match prepare_changes(req, &material) {
        Ok(changes) => changes,
        Err(e) => return Ok(error_response(&e, "资料参数无效")),
    };

    if changes.kind == Some(MaterialKind::File)
        && let Some(reference) = changes.reference.as_deref()
        && reference != material.reference
        && let Err(resp) = check_file_reference(&storage, reference, current_user.id).await
    {
        return Ok(resp);
    }

    match storage.update_material(material_id, changes).await {
        Ok(Some(updated)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "资料更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "资料不存在",
        ))),
        Err(e) => Ok(error_response(&e, "更新资料失败")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> Material {
        Material {
            id: 4,
            title: "Essay".into(),
            description: Some("old".into()),
            kind: MaterialKind::Link,
            reference: "https://example.com/essay".into(),
            deadline: None,
            max_score: Some(100.0),
            late_accepted: false,
            created_by: 2,
            uploaded_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn empty() -> UpdateMaterialRequest {
        UpdateMaterialRequest {
            title: None,
            description: None,
            kind: None,
            reference: None,
            deadline: None,
            clear_deadline: false,
            max_score: None,
            clear_max_score: false,
            late_accepted: None,
        }
    }

    #[test]
    fn test_empty_request_changes_nothing() {
        let changes = prepare_changes(empty(), &current()).unwrap();
        assert!(changes.title.is_none());
        assert!(changes.deadline.is_none());
        assert!(changes.max_score.is_none());
        assert!(changes.kind.is_none());
    }

    #[test]
    fn test_clear_flags() {
        let mut req = empty();
        req.clear_max_score = true;
        req.description = Some(" ".into());
        let changes = prepare_changes(req, &current()).unwrap();
        assert_eq!(changes.max_score, Some(None));
        assert_eq!(changes.description, Some(None));

        let mut req = empty();
        req.clear_deadline = true;
        req.deadline = Some("2024-01-10T00:00:00Z".into());
        assert_eq!(prepare_changes(req, &current()).unwrap_err().code(), "E005");
    }

    #[test]
    fn test_kind_change_revalidates_reference() {
        let mut req = empty();
        req.reference = Some("not a url".into());
        assert!(prepare_changes(req, &current()).is_err());

        let mut req = empty();
        req.kind = Some(MaterialKind::File);
        req.reference = Some("2024/01/abc.pdf".into());
        let changes = prepare_changes(req, &current()).unwrap();
        assert_eq!(changes.kind, Some(MaterialKind::File));
        assert_eq!(changes.reference.as_deref(), Some("2024/01/abc.pdf"));
    }

    #[test]
    fn test_malformed_deadline_is_rejected() {
        let mut req = empty();
        req.deadline = Some("".into());
        assert_eq!(prepare_changes(req, &current()).unwrap_err().code(), "E008");
    }
}
