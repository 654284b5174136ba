//! 时间戳转换
//!
//! 数据库中统一以 Unix 秒保存时间，接口层使用 RFC 3339 文本。
//! 任何无法解析的输入都返回 `InvalidTimestamp`，不会被当作“未设置”。

use chrono::{DateTime, Utc};

use crate::errors::{LmsError, Result};

/// 将 Unix 秒转换为 UTC 时间
pub fn from_unix(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| LmsError::invalid_timestamp(format!("时间戳超出范围: {secs}")))
}

pub fn from_unix_opt(secs: Option<i64>) -> Result<Option<DateTime<Utc>>> {
    secs.map(from_unix).transpose()
}

/// 解析 RFC 3339 文本
pub fn parse_rfc3339(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LmsError::invalid_timestamp("时间不能为空字符串"));
    }
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map_err(|e| LmsError::invalid_timestamp(format!("无法解析时间 '{trimmed}': {e}")))?;
    Ok(parsed.with_timezone(&Utc))
}

/// 解析可选的 RFC 3339 文本，None 表示未设置
pub fn parse_optional(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(parse_rfc3339).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_unix_round_trip() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        assert_eq!(from_unix(dt.timestamp()).unwrap(), dt);
        assert_eq!(from_unix_opt(None).unwrap(), None);
    }

    #[test]
    fn test_from_unix_out_of_range() {
        let err = from_unix(i64::MAX).unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[test]
    fn test_parse_rfc3339_normalizes_offset() {
        let dt = parse_rfc3339("2024-01-10T08:00:00+08:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage_and_empty() {
        assert_eq!(parse_rfc3339("yesterday").unwrap_err().code(), "E008");
        assert_eq!(parse_rfc3339("   ").unwrap_err().code(), "E008");
        assert_eq!(parse_optional(Some("2024-13-01T00:00:00Z")).unwrap_err().code(), "E008");
        assert_eq!(parse_optional(None).unwrap(), None);
    }
}
