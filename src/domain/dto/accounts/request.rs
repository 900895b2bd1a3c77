use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::utils::string_utils::deserialize_optional_string;

/// 로그인 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 256, message = "User name must be between 1 and 256 characters"))]
    pub user_name: String,

    #[validate(length(min = 1, max = 256, message = "Password must be between 1 and 256 characters"))]
    pub password: String,
}

/// 회원가입 요청 DTO
///
/// 비밀번호 복잡도(숫자/대소문자/특수문자)는 자격 증명 저장소의 정책 검사에서 처리합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 256, message = "First name must be between 1 and 256 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub first_name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 256, message = "Last name must be at most 256 characters"))]
    pub last_name: Option<String>,

    #[validate(email(message = "Email is not a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 256, message = "User name must be between 1 and 256 characters"))]
    #[validate(custom(function = "validate_user_name"))]
    pub user_name: String,

    #[validate(length(min = 1, max = 50, message = "Password must be between 1 and 50 characters"))]
    pub password: String,
}

/// 비밀번호 변경 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, max = 256, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 1, max = 50, message = "New password must be between 1 and 50 characters"))]
    pub new_password: String,
}

/// 이메일 확인 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmEmailRequest {
    #[validate(length(min = 1, max = 256, message = "User name must be between 1 and 256 characters"))]
    pub user_name: String,

    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// 관리자 계정 잠금 요청 DTO
///
/// `lockoutMinutes`가 0이면 잠금을 해제합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LockoutRequest {
    #[validate(range(min = 0, max = 525_600, message = "Lockout minutes must be between 0 and 525600"))]
    pub lockout_minutes: i64,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("First name must not be blank".into()));
    }
    Ok(())
}

fn validate_user_name(user_name: &str) -> Result<(), ValidationError> {
    // 알파벳, 숫자와 - . _ @ + 만 허용
    let allowed = |c: char| c.is_ascii_alphanumeric() || "-._@+".contains(c);
    if !user_name.chars().all(allowed) {
        return Err(ValidationError::new("invalid_user_name").with_message(
            "User name can only contain letters, digits and the characters - . _ @ +".into(),
        ));
    }
    Ok(())
}
