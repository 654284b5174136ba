//! 路径参数提取器
//!
//! 在进入处理函数前完成路径参数的解析和校验，失败时直接返回统一的 400 响应。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path(message: String) -> actix_web::Error {
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

macro_rules! define_id_extractors {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req
        .match_info()
        .get(param)
        .ok_or_else(|| bad_path(format!("Missing path parameter: {param}")))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_path(format!("Invalid {param}: {raw}"))),
    }
}

define_id_extractors! {
    SafeIDI64 => "id",
    SafeUserIdI64 => "user_id",
}

/// 对象存储路径，形如 `2025/03/<uuid>.pdf`
#[derive(Debug, Clone)]
pub struct SafeFileRef(pub String);

impl SafeFileRef {
    /// 每段只允许字母、数字、点、下划线和连字符，且不得出现 `.`/`..` 段
    pub fn is_safe(file_ref: &str) -> bool {
        !file_ref.is_empty()
            && file_ref.len() <= 255
            && file_ref.split('/').all(|segment| {
                !segment.is_empty()
                    && segment != "."
                    && segment != ".."
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            })
    }
}

impl FromRequest for SafeFileRef {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("file_ref").unwrap_or_default();
        let result = if Self::is_safe(raw) {
            Ok(SafeFileRef(raw.to_string()))
        } else {
            Err(bad_path(format!("Invalid file reference: {raw}")))
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_file_ref_rules() {
        assert!(SafeFileRef::is_safe("2025/03/0b6e1f.pdf"));
        assert!(!SafeFileRef::is_safe("../etc/passwd"));
        assert!(!SafeFileRef::is_safe("2025//a.pdf"));
        assert!(!SafeFileRef::is_safe("2025/03/a b.pdf"));
        assert!(!SafeFileRef::is_safe(""));
    }

    #[actix_web::test]
    async fn test_id_extractor_rejects_non_positive() {
        let req = TestRequest::default()
            .param("id", "0")
            .to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());

        let req = TestRequest::default()
            .param("id", "17")
            .to_http_request();
        assert_eq!(SafeIDI64::extract(&req).await.unwrap().0, 17);
    }
}
