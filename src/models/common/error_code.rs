use crate::errors::LmsError;

/// 业务错误码，随响应体中的 `code` 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用请求错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    InvalidTimestamp = 1002,

    // 认证与授权
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2003,
    RateLimitExceeded = 2029,

    // 资源
    NotFound = 3000,
    UserNotFound = 3001,
    MaterialNotFound = 3002,
    SubmissionNotFound = 3003,
    FileNotFound = 3004,

    // 用户
    UserNameAlreadyExists = 4000,
    UserEmailAlreadyExists = 4001,
    UserNameInvalid = 4002,
    UserEmailInvalid = 4003,
    UserPasswordInvalid = 4004,

    // 文件
    FileUploadFailed = 4100,
    FileTypeNotAllowed = 4101,
    FileSizeExceeded = 4102,
    MultifileUploadNotAllowed = 4103,

    InternalServerError = 5000,
}

impl From<&LmsError> for ErrorCode {
    fn from(err: &LmsError) -> Self {
        match err {
            LmsError::Validation(_) => ErrorCode::ValidationFailed,
            LmsError::InvalidTimestamp(_) => ErrorCode::InvalidTimestamp,
            LmsError::NotFound(_) => ErrorCode::NotFound,
            LmsError::Authentication(_) => ErrorCode::Unauthorized,
            LmsError::Authorization(_) => ErrorCode::Forbidden,
            _ => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_from_lms_error() {
        assert_eq!(
            ErrorCode::from(&LmsError::validation("x")),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            ErrorCode::from(&LmsError::invalid_timestamp("x")),
            ErrorCode::InvalidTimestamp
        );
        assert_eq!(
            ErrorCode::from(&LmsError::database_operation("x")),
            ErrorCode::InternalServerError
        );
        assert_eq!(ErrorCode::Success as i32, 0);
    }
}
