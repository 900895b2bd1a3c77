//! # 문자열 유틸리티
//!
//! 요청 DTO와 서비스 계층에서 사용하는 문자열 정리/검증 함수들입니다.

use serde::Deserialize;

use crate::core::errors::AppError;

/// 필수 문자열을 검증하고 앞뒤 공백을 제거합니다.
///
/// # Errors
///
/// * `AppError::ValidationError` - 공백만 있거나 비어 있는 경우
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field_name)));
    }
    Ok(trimmed.to_string())
}

/// 선택 문자열을 정리합니다. 공백만 있으면 `None`이 됩니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde `deserialize_with`용: 빈 문자열/공백 문자열/null을 `None`으로 변환
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
