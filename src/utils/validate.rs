use once_cell::sync::Lazy;
use regex::Regex;

pub const TITLE_MAX_CHARS: usize = 200;
pub const COMMENT_MAX_CHARS: usize = 2000;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,32}$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("Invalid link regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must be 3-32 characters of letters, numbers, underscores or hyphens",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略：至少 8 个字符，同时包含大写字母、小写字母和数字，且不在常见弱密码表中
pub fn validate_password(password: &str) -> Result<(), String> {
    const WEAK: [&str; 6] = [
        "password1",
        "qwerty123",
        "admin1234",
        "abcd1234",
        "welcome1",
        "letmein1",
    ];

    let checks: [(bool, &str); 4] = [
        (
            password.chars().count() >= 8,
            "Password must be at least 8 characters long",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain at least one uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain at least one lowercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one digit",
        ),
    ];

    let mut errors: Vec<&str> = checks
        .iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, msg)| *msg)
        .collect();

    if WEAK.iter().any(|weak| password.eq_ignore_ascii_case(weak)) {
        errors.push("Password is too common, please choose a stronger password");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

/// 资料标题：去除首尾空白后 1..=200 个字符
pub fn validate_title(title: &str) -> Result<(), &'static str> {
    let len = title.trim().chars().count();
    if len == 0 {
        return Err("Title is required");
    }
    if len > TITLE_MAX_CHARS {
        return Err("Title must be at most 200 characters");
    }
    Ok(())
}

/// 链接类资料只接受 http(s) 地址
pub fn validate_link(url: &str) -> Result<(), &'static str> {
    if !LINK_RE.is_match(url.trim()) {
        return Err("Link must be an http:// or https:// URL");
    }
    Ok(())
}

pub fn validate_comment(comment: &str) -> Result<(), &'static str> {
    if comment.chars().count() > COMMENT_MAX_CHARS {
        return Err("Comment must be at most 2000 characters");
    }
    Ok(())
}

/// 满分必须为正的有限数
pub fn validate_max_score(max_score: f64) -> Result<(), &'static str> {
    if !max_score.is_finite() || max_score <= 0.0 {
        return Err("max_score must be a positive number");
    }
    Ok(())
}

/// 评分不得为负，设有满分时不得超过满分
pub fn validate_remark(remark: f64, max_score: Option<f64>) -> Result<(), String> {
    if !remark.is_finite() || remark < 0.0 {
        return Err("Remark must be a non-negative number".to_string());
    }
    if let Some(max) = max_score
        && remark > max
    {
        return Err(format!("Remark must not exceed the maximum score {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("student@uni.edu").is_ok());
        assert!(validate_email("student@uni").is_err());
    }

    #[test]
    fn test_password_collects_all_failures() {
        assert!(validate_password("SecurePass123").is_ok());
        let err = validate_password("abc").unwrap_err();
        assert!(err.contains("at least 8 characters"));
        assert!(err.contains("uppercase"));
        assert!(err.contains("digit"));
        assert!(validate_password("Password1").unwrap_err().contains("too common"));
    }

    #[test]
    fn test_title_bounds() {
        assert!(validate_title("Week 1 reading").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(201)).is_err());
        assert!(validate_title(&"題".repeat(200)).is_ok());
    }

    #[test]
    fn test_link_requires_http_scheme() {
        assert!(validate_link("https://example.com/slides").is_ok());
        assert!(validate_link("ftp://example.com/file").is_err());
        assert!(validate_link("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_remark_bounds() {
        assert!(validate_remark(0.0, Some(10.0)).is_ok());
        assert!(validate_remark(10.0, Some(10.0)).is_ok());
        assert!(validate_remark(10.5, Some(10.0)).is_err());
        assert!(validate_remark(-1.0, None).is_err());
        assert!(validate_remark(f64::NAN, None).is_err());
        assert!(validate_remark(250.0, None).is_ok());
    }

    #[test]
    fn test_max_score_positive() {
        assert!(validate_max_score(100.0).is_ok());
        assert!(validate_max_score(0.0).is_err());
        assert!(validate_max_score(f64::INFINITY).is_err());
    }
}
