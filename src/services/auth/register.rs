use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, NewUser};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

use super::AuthService;

/// 校验注册字段，返回对应的错误码与提示
pub(crate) fn validate_registration(req: &CreateUserRequest) -> Result<(), (ErrorCode, String)> {
    validate_username(&req.username).map_err(|m| (ErrorCode::UserNameInvalid, m.to_string()))?;
    validate_email(&req.email).map_err(|m| (ErrorCode::UserEmailInvalid, m.to_string()))?;
    validate_password(&req.password).map_err(|m| (ErrorCode::UserPasswordInvalid, m))?;
    Ok(())
}

pub async fn handle_register(
    service: &AuthService,
    create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err((code, msg)) = validate_registration(&create_request) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    // 检查用户名与邮箱是否已被占用
    if let Err(response) =
        check_available(&storage, &create_request.username, &create_request.email).await
    {
        return Ok(response);
    }

    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(&e, "密码哈希失败")),
    };

    // 自助注册一律为学生
    let new_user = NewUser {
        username: create_request.username,
        email: create_request.email,
        password_hash,
        role: UserRole::Student,
        display_name: create_request
            .display_name
            .filter(|name| !name.trim().is_empty()),
    };

    match storage.create_user(new_user).await {
        Ok(user) => {
            tracing::info!("User {} registered", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
        }
        Err(e) => Ok(error_response(&e, "注册失败")),
    }
}

pub(crate) async fn check_available(
    storage: &Arc<dyn Storage>,
    username: &str,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => {
            return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Err(error_response(&e, "Register failed")),
    }

    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(error_response(&e, "Register failed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            role: Some(UserRole::Admin),
            display_name: None,
        }
    }

    #[test]
    fn test_validate_registration_codes() {
        let (code, _) =
            validate_registration(&request("a", "a@example.com", "Str0ng!Pass")).unwrap_err();
        assert_eq!(code, ErrorCode::UserNameInvalid);

        let (code, _) = validate_registration(&request("alice", "nope", "Str0ng!Pass")).unwrap_err();
        assert_eq!(code, ErrorCode::UserEmailInvalid);

        let (code, _) =
            validate_registration(&request("alice", "alice@example.com", "short")).unwrap_err();
        assert_eq!(code, ErrorCode::UserPasswordInvalid);
    }
}
