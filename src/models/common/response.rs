use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::LmsError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 由领域错误构造响应体，外部服务错误只返回通用提示
    pub fn from_error(err: &LmsError) -> Self {
        let message = if err.is_upstream() {
            "Internal server error, please try again later".to_string()
        } else {
            err.message().to_string()
        };
        Self::error_empty(ErrorCode::from(err), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_hides_upstream_details() {
        let resp = ApiResponse::from_error(&LmsError::database_operation(
            "connection refused at 10.0.0.3",
        ));
        assert_eq!(resp.code, ErrorCode::InternalServerError as i32);
        assert!(!resp.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_from_error_keeps_validation_message() {
        let resp = ApiResponse::from_error(&LmsError::validation("file_ref is required"));
        assert_eq!(resp.code, ErrorCode::ValidationFailed as i32);
        assert_eq!(resp.message, "file_ref is required");
        assert!(resp.data.is_none());
    }
}
