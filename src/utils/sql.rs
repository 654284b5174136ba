/// 转义 LIKE 模式中的通配符，避免用户输入的 % 和 _ 被当作通配符
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// 构造“包含”匹配的 LIKE 表达式，显式声明转义符
pub fn contains_pattern(search: &str) -> sea_orm::sea_query::LikeExpr {
    sea_orm::sea_query::LikeExpr::new(format!("%{}%", escape_like_pattern(search))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("week_1 100%"), "week\\_1 100\\%");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
