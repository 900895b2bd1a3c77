//! 비밀번호 정책
//!
//! 계정 생성과 비밀번호 변경 시 적용되며, 위반한 규칙을 모두 메시지로 수집합니다.

/// 비밀번호 복잡도 규칙
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordPolicy {
    pub required_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            required_length: 8,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
        }
    }
}

impl PasswordPolicy {
    /// 위반한 규칙의 메시지 목록 (비어 있으면 통과)
    pub fn validate(&self, password: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if password.chars().count() < self.required_length {
            errors.push(format!(
                "Passwords must be at least {} characters.",
                self.required_length
            ));
        }
        if self.require_non_alphanumeric && password.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push("Passwords must have at least one non alphanumeric character.".to_string());
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("Passwords must have at least one digit ('0'-'9').".to_string());
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            errors.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            errors.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(PasswordPolicy::default().validate("Passw0rd!").is_empty());
    }

    #[test]
    fn test_collects_every_violation() {
        let errors = PasswordPolicy::default().validate("abc");
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("at least 8 characters"));
    }

    #[test]
    fn test_single_rule_violations() {
        let policy = PasswordPolicy::default();
        assert_eq!(policy.validate("Password1"), vec![
            "Passwords must have at least one non alphanumeric character."
        ]);
        assert_eq!(policy.validate("Password!"), vec![
            "Passwords must have at least one digit ('0'-'9')."
        ]);
        assert_eq!(policy.validate("PASSW0RD!"), vec![
            "Passwords must have at least one lowercase ('a'-'z')."
        ]);
        assert_eq!(policy.validate("passw0rd!"), vec![
            "Passwords must have at least one uppercase ('A'-'Z')."
        ]);
    }

    #[test]
    fn test_relaxed_policy() {
        let policy = PasswordPolicy {
            required_length: 4,
            require_digit: false,
            require_lowercase: false,
            require_uppercase: false,
            require_non_alphanumeric: false,
        };
        assert!(policy.validate("abcd").is_empty());
    }
}
