use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,           // Subject (user ID)
    pub role: UserRole,        // 签发时的用户角色
    pub token_type: TokenType, // access 或 refresh
    pub exp: usize,            // 过期时间 (时间戳)
    pub iat: usize,            // 签发时间
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

// Token 对
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    fn sign(
        secret: &str,
        user_id: i64,
        role: UserRole,
        token_type: TokenType,
        expiry: chrono::TimeDelta,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            token_type,
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    fn verify_with_secret(
        secret: &str,
        token: &str,
        expected: TokenType,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;
        if claims.token_type != expected {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: UserRole,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::sign(
            Self::get_secret(),
            user_id,
            role,
            TokenType::Access,
            chrono::TimeDelta::minutes(config.jwt.access_token_expiry),
        )
    }

    // 生成 Refresh Token，未指定有效期时使用默认配置
    pub fn generate_refresh_token(
        user_id: i64,
        role: UserRole,
        expiry: Option<chrono::TimeDelta>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let expiry =
            expiry.unwrap_or_else(|| chrono::TimeDelta::days(config.jwt.refresh_token_expiry));
        Self::sign(
            Self::get_secret(),
            user_id,
            role,
            TokenType::Refresh,
            expiry,
        )
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: UserRole,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::generate_refresh_token(user_id, role, refresh_token_expiry)?,
        })
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_with_secret(Self::get_secret(), token, TokenType::Access)
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_with_secret(Self::get_secret(), token, TokenType::Refresh)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        max_age: chrono::TimeDelta,
    ) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_TOKEN_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                max_age.num_seconds(),
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_TOKEN_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_sign_and_verify_access_token() {
        let token = JwtUtils::sign(
            SECRET,
            42,
            UserRole::Staff,
            TokenType::Access,
            chrono::TimeDelta::minutes(5),
        )
        .unwrap();
        let claims = JwtUtils::verify_with_secret(SECRET, &token, TokenType::Access).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, UserRole::Staff);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let token = JwtUtils::sign(
            SECRET,
            1,
            UserRole::Student,
            TokenType::Refresh,
            chrono::TimeDelta::days(1),
        )
        .unwrap();
        assert!(JwtUtils::verify_with_secret(SECRET, &token, TokenType::Access).is_err());
        assert!(JwtUtils::verify_with_secret(SECRET, &token, TokenType::Refresh).is_ok());
    }

    #[test]
    fn test_wrong_secret_and_expired_tokens_fail() {
        let token = JwtUtils::sign(
            SECRET,
            1,
            UserRole::Admin,
            TokenType::Access,
            chrono::TimeDelta::minutes(5),
        )
        .unwrap();
        assert!(JwtUtils::verify_with_secret("other", &token, TokenType::Access).is_err());

        // 超过默认 60 秒容差的过期令牌
        let expired = JwtUtils::sign(
            SECRET,
            1,
            UserRole::Admin,
            TokenType::Access,
            chrono::TimeDelta::minutes(-10),
        )
        .unwrap();
        assert!(JwtUtils::verify_with_secret(SECRET, &expired, TokenType::Access).is_err());
    }
}
