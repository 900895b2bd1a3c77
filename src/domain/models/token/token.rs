//! 로그인/갱신 응답 토큰 묶음

use serde::{Deserialize, Serialize};

/// 로그인 및 토큰 갱신 성공 시 반환되는 토큰 쌍
///
/// JSON 표현은 `{ "accessToken": "...", "refreshToken": "..." }` 입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// 서명된 JWT 액세스 토큰
    pub access_token: String,
    /// 불투명 리프레시 토큰 (256바이트 난수의 base64 표현)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl AuthResponse {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token: Some(refresh_token),
        }
    }
}
