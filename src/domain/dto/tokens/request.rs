use serde::Deserialize;
use validator::Validate;

/// 토큰 갱신 요청 DTO
///
/// 만료된(또는 만료 예정인) 액세스 토큰과 함께 발급받은 리프레시 토큰을 제출합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Access token is required"))]
    pub access_token: String,

    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_request_camel_case() {
        let request: RefreshTokenRequest =
            serde_json::from_str(r#"{"accessToken": "a", "refreshToken": "b"}"#).unwrap();
        assert_eq!(request.access_token, "a");
        assert_eq!(request.refresh_token, "b");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_refresh_request_requires_both_tokens() {
        let request = RefreshTokenRequest {
            access_token: String::new(),
            refresh_token: String::new(),
        };
        assert_eq!(request.validate().unwrap_err().field_errors().len(), 2);
    }
}
