use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::requests::{UpdateUserRequest, UserChanges};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

/// 校验字段，密码暂不哈希
pub(crate) fn validate_update(req: &UpdateUserRequest) -> Result<(), (ErrorCode, String)> {
    if let Some(email) = &req.email {
        validate_email(email).map_err(|m| (ErrorCode::UserEmailInvalid, m.to_string()))?;
    }
    if let Some(password) = &req.password {
        validate_password(password).map_err(|m| (ErrorCode::UserPasswordInvalid, m))?;
    }
    Ok(())
}

pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    update_data: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err((code, msg)) = validate_update(&update_data) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    // 邮箱不能与其他用户重复
    if let Some(email) = &update_data.email {
        match storage.get_user_by_email(email).await {
            Ok(Some(existing)) if existing.id != user_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email already exists",
                )));
            }
            Ok(_) => {}
            Err(e) => return Ok(error_response(&e, "查询用户失败")),
        }
    }

    let password_hash = match update_data.password.as_deref().map(hash_password).transpose() {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(&e, "Password hashing failed")),
    };

    let changes = UserChanges {
        email: update_data.email,
        password_hash,
        role: update_data.role,
        status: update_data.status,
        display_name: update_data.display_name,
    };

    match storage.update_user(user_id, changes).await {
        Ok(Some(user)) => {
            service.evict(request, user_id).await;
            tracing::info!("User {} updated", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                user,
                "User information updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to update user information")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn request() -> UpdateUserRequest {
        UpdateUserRequest {
            email: None,
            password: None,
            role: Some(UserRole::Staff),
            status: None,
            display_name: None,
        }
    }

    #[test]
    fn test_validate_update() {
        assert!(validate_update(&request()).is_ok());

        let mut req = request();
        req.email = Some("bad-email".into());
        assert_eq!(validate_update(&req).unwrap_err().0, ErrorCode::UserEmailInvalid);

        let mut req = request();
        req.password = Some("weak".into());
        assert_eq!(
            validate_update(&req).unwrap_err().0,
            ErrorCode::UserPasswordInvalid
        );
    }
}
