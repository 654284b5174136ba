use rand::Rng;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 生成指定长度的大写字母数字随机串
pub fn random_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// 提交编号，形如 `TSK-7QX2M9KD`
pub fn task_code() -> String {
    format!("TSK-{}", random_code(8))
}

/// 随机初始密码，保证满足密码策略
pub fn initial_password() -> String {
    format!("Lms{}a9", random_code(12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_code_format() {
        let code = task_code();
        assert_eq!(code.len(), 12);
        assert!(code.starts_with("TSK-"));
        assert!(code[4..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_initial_password_meets_policy() {
        let password = initial_password();
        assert!(crate::utils::validate::validate_password(&password).is_ok());
    }
}
