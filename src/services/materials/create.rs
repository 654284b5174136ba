use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialService, check_file_reference};
use crate::errors::{LmsError, Result};
use crate::models::ApiResponse;
use crate::models::materials::entities::MaterialKind;
use crate::models::materials::requests::{CreateMaterialRequest, NewMaterial};
use crate::models::users::entities::User;
use crate::services::error_response;
use crate::utils::timestamp::parse_optional;
use crate::utils::validate::{validate_link, validate_max_score, validate_title};

/// 校验请求并构造新资料
pub(crate) fn prepare(req: CreateMaterialRequest, created_by: i64) -> Result<NewMaterial> {
    let title = req.title.trim().to_string();
    validate_title(&title).map_err(LmsError::validation)?;

    let reference = req.reference.trim().to_string();
    match req.kind {
        MaterialKind::Link => validate_link(&reference).map_err(LmsError::validation)?,
        MaterialKind::File if reference.is_empty() => {
            return Err(LmsError::validation("文件类资料必须提供 file_ref"));
        }
        MaterialKind::File => {}
    }

    if let Some(max_score) = req.max_score {
        validate_max_score(max_score).map_err(LmsError::validation)?;
    }

    Ok(NewMaterial {
        title,
        description: req.description.filter(|d| !d.trim().is_empty()),
        kind: req.kind,
        reference,
        deadline: parse_optional(req.deadline.as_deref())?,
        max_score: req.max_score,
        late_accepted: req.late_accepted.unwrap_or(false),
        created_by,
    })
}

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    creator: &User,
    req: CreateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let new_material = match prepare(req, creator.id) {
        Ok(material) => material,
        Err(e) => return Ok(error_response(&e, "资料参数无效")),
    };

    if new_material.kind == MaterialKind::File
        && let Err(resp) = check_file_reference(&storage, &new_material.reference, creator.id).await
    {
        return Ok(resp);
    }

    match storage.create_material(new_material).await {
        Ok(material) => {
            tracing::info!(
                "Material {} created by user {}",
                material.id,
                creator.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(material, "资料创建成功")))
        }
        Err(e) => Ok(error_response(&e, "创建资料失败")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: MaterialKind, reference: &str) -> CreateMaterialRequest {
        CreateMaterialRequest {
            title: "  Week 1 Notes ".into(),
            description: Some("  ".into()),
            kind,
            reference: reference.into(),
            deadline: None,
            max_score: None,
            late_accepted: None,
        }
    }

    #[test]
    fn test_prepare_trims_and_defaults() {
        let material = prepare(request(MaterialKind::Link, "https://example.com/a"), 3).unwrap();
        assert_eq!(material.title, "Week 1 Notes");
        assert!(material.description.is_none());
        assert!(!material.late_accepted);
        assert_eq!(material.created_by, 3);
    }

    #[test]
    fn test_prepare_rejects_bad_input() {
        assert!(prepare(request(MaterialKind::Link, "ftp://example.com"), 1).is_err());
        assert!(prepare(request(MaterialKind::File, " "), 1).is_err());

        let mut bad_score = request(MaterialKind::Link, "https://example.com");
        bad_score.max_score = Some(0.0);
        assert_eq!(prepare(bad_score, 1).unwrap_err().code(), "E005");

        let mut empty_title = request(MaterialKind::Link, "https://example.com");
        empty_title.title = "   ".into();
        assert!(prepare(empty_title, 1).is_err());
    }

    #[test]
    fn test_prepare_rejects_malformed_deadline() {
        let mut req = request(MaterialKind::Link, "https://example.com");
        req.deadline = Some("tomorrow".into());
        assert_eq!(prepare(req, 1).unwrap_err().code(), "E008");

        let mut req = request(MaterialKind::Link, "https://example.com");
        req.deadline = Some("2024-01-10T00:00:00Z".into());
        assert!(prepare(req, 1).unwrap().deadline.is_some());
    }
}
