//! JWT 토큰 코덱 구현
//!
//! HMAC-SHA256으로 서명된 액세스 토큰을 발급/검증하고,
//! 서버에 저장되는 불투명 리프레시 토큰을 생성합니다.
//!
//! # 검증 규칙
//!
//! | 항목 | 규칙 |
//! |------|------|
//! | 알고리즘 | HS256만 허용 (`none` 포함 나머지는 거부) |
//! | 서명 | 설정된 보안 키로 검증 |
//! | `iss` / `aud` | 설정값과 정확히 일치해야 함 |
//! | `exp` / `nbf` | `check_expiry = true`일 때만 검증, 허용 오차 0초 |
//!
//! 검증 실패는 에러로 전파되지 않고 `None`으로 반환됩니다.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::config::JwtSettings;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::token::ClaimSet;

/// 리프레시 토큰 난수 길이 (바이트)
pub const REFRESH_TOKEN_BYTES: usize = 256;

/// JWT 페이로드 (표준 클레임 + 도메인 클레임)
#[derive(Debug, Serialize, Deserialize)]
struct JwtPayload {
    #[serde(flatten)]
    claims: Map<String, Value>,
    iss: String,
    aud: String,
    iat: i64,
    nbf: i64,
    exp: i64,
}

/// 액세스 토큰 발급/검증기
pub struct TokenCodec {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    pub fn new(settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.security_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.security_key.as_bytes());

        Self {
            settings,
            encoding_key,
            decoding_key,
        }
    }

    pub fn settings(&self) -> &JwtSettings {
        &self.settings
    }

    /// 현재 시각 기준으로 액세스 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - JWT 인코딩 실패
    pub fn issue_access_token(&self, claims: &ClaimSet) -> AppResult<String> {
        self.issue_access_token_at(claims, Utc::now())
    }

    /// 지정한 발급 시각으로 액세스 토큰을 발급합니다.
    ///
    /// `iat = nbf = issued_at`, `exp = issued_at + access_token_ttl`.
    pub fn issue_access_token_at(&self, claims: &ClaimSet, issued_at: DateTime<Utc>) -> AppResult<String> {
        let expires_at = issued_at + self.settings.access_token_ttl;

        let payload = JwtPayload {
            claims: claims.to_json_map(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 액세스 토큰을 검증하고 클레임을 반환합니다.
    ///
    /// `check_expiry = false`이면 만료된 토큰도 서명/발급자/대상이 유효하면 통과합니다.
    /// 토큰 갱신 흐름에서만 사용합니다.
    pub fn validate_access_token(&self, token: &str, check_expiry: bool) -> Option<ClaimSet> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.settings.issuer.as_str()]);
        validation.set_audience(&[self.settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = 0;
        validation.validate_exp = check_expiry;
        validation.validate_nbf = check_expiry;

        match decode::<JwtPayload>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(ClaimSet::from_json_map(&data.claims.claims)),
            Err(e) => {
                log::debug!("액세스 토큰 검증 실패: {:?}", e.kind());
                None
            }
        }
    }

    /// 암호학적으로 안전한 256바이트 난수를 base64로 인코딩한 리프레시 토큰
    pub fn generate_refresh_token() -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }
}

/// 저장된 리프레시 토큰과 제출된 토큰을 비교합니다.
///
/// SHA-256 다이제스트끼리 비교하므로 비교 시간이 공통 접두사 길이에 좌우되지 않습니다.
pub fn refresh_tokens_match(stored: &str, presented: &str) -> bool {
    Sha256::digest(stored.as_bytes()) == Sha256::digest(presented.as_bytes())
}

/// `Authorization` 헤더 값에서 Bearer 토큰 부분을 추출합니다.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let token = auth_header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::Duration;

    use crate::domain::models::token::ClaimType;

    pub(crate) fn test_settings() -> JwtSettings {
        JwtSettings {
            security_key: "unit-test-security-key-with-enough-length".to_string(),
            issuer: "identity-tests".to_string(),
            audience: "identity-tests-audience".to_string(),
            access_token_ttl: Duration::minutes(60),
            refresh_token_ttl: Duration::minutes(120),
        }
    }

    fn sample_claims() -> ClaimSet {
        let mut claims = ClaimSet::new();
        claims.push(ClaimType::NameIdentifier, "0b7c6f6e-1a1a-4c53-9d0e-111111111111");
        claims.push(ClaimType::GivenName, "Jane");
        claims.push(ClaimType::Surname, "");
        claims.push(ClaimType::Name, "jane");
        claims.push(ClaimType::Email, "jane@x.com");
        claims.push(ClaimType::SerialNumber, "STAMP");
        claims.push(ClaimType::Role, "User");
        claims.push(ClaimType::Role, "PowerUser");
        claims
    }

    #[test]
    fn test_issue_then_validate_round_trip() {
        let codec = TokenCodec::new(test_settings());
        let claims = sample_claims();

        let token = codec.issue_access_token(&claims).unwrap();

        assert_eq!(codec.validate_access_token(&token, true), Some(claims.clone()));
        assert_eq!(codec.validate_access_token(&token, false), Some(claims));
    }

    #[test]
    fn test_round_trip_with_repeated_and_missing_claims() {
        let codec = TokenCodec::new(test_settings());
        let mut claims = ClaimSet::new();
        claims.push(ClaimType::Email, "a@x.com");
        claims.push(ClaimType::Email, "b@x.com");
        claims.push(ClaimType::Name, "only-name");

        let token = codec.issue_access_token(&claims).unwrap();
        assert_eq!(codec.validate_access_token(&token, false), Some(claims));
    }

    #[test]
    fn test_signature_bit_flip_fails() {
        let codec = TokenCodec::new(test_settings());
        let token = codec.issue_access_token(&sample_claims()).unwrap();

        let (signed_part, signature) = token.rsplit_once('.').unwrap();
        let signature_bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();

        for bit in 0..signature_bytes.len() * 8 {
            let mut flipped = signature_bytes.clone();
            flipped[bit / 8] ^= 1 << (bit % 8);
            let tampered = format!("{}.{}", signed_part, URL_SAFE_NO_PAD.encode(&flipped));

            assert!(
                codec.validate_access_token(&tampered, false).is_none(),
                "bit {} flip was accepted",
                bit
            );
        }
    }

    #[test]
    fn test_expired_token_respects_check_expiry_flag() {
        let codec = TokenCodec::new(test_settings());
        let issued_at = Utc::now() - Duration::hours(2);
        let token = codec.issue_access_token_at(&sample_claims(), issued_at).unwrap();

        assert!(codec.validate_access_token(&token, true).is_none());
        assert!(codec.validate_access_token(&token, false).is_some());
    }

    #[test]
    fn test_wrong_issuer_audience_or_key_fails() {
        let codec = TokenCodec::new(test_settings());
        let token = codec.issue_access_token(&sample_claims()).unwrap();

        let other_issuer = TokenCodec::new(JwtSettings {
            issuer: "someone-else".to_string(),
            ..test_settings()
        });
        let other_audience = TokenCodec::new(JwtSettings {
            audience: "someone-else".to_string(),
            ..test_settings()
        });
        let other_key = TokenCodec::new(JwtSettings {
            security_key: "a-completely-different-signing-key".to_string(),
            ..test_settings()
        });

        assert!(other_issuer.validate_access_token(&token, false).is_none());
        assert!(other_audience.validate_access_token(&token, false).is_none());
        assert!(other_key.validate_access_token(&token, false).is_none());
    }

    #[test]
    fn test_rejects_none_and_other_algorithms() {
        let codec = TokenCodec::new(test_settings());
        let token = codec.issue_access_token(&sample_claims()).unwrap();
        let mut parts = token.split('.');
        let _header = parts.next().unwrap();
        let payload = parts.next().unwrap();

        let none_header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let unsigned = format!("{}.{}.", none_header, payload);
        assert!(codec.validate_access_token(&unsigned, false).is_none());

        let hs512 = encode(
            &Header::new(Algorithm::HS512),
            &serde_json::from_slice::<Value>(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap(),
            &EncodingKey::from_secret(test_settings().security_key.as_bytes()),
        )
        .unwrap();
        assert!(codec.validate_access_token(&hs512, false).is_none());
    }

    #[test]
    fn test_garbage_token_is_none() {
        let codec = TokenCodec::new(test_settings());
        assert!(codec.validate_access_token("not-a-jwt", false).is_none());
        assert!(codec.validate_access_token("", false).is_none());
    }

    #[test]
    fn test_refresh_token_shape() {
        let first = TokenCodec::generate_refresh_token();
        let second = TokenCodec::generate_refresh_token();

        assert_ne!(first, second);
        assert_eq!(STANDARD.decode(&first).unwrap().len(), REFRESH_TOKEN_BYTES);
    }

    #[test]
    fn test_refresh_tokens_match() {
        assert!(refresh_tokens_match("abc", "abc"));
        assert!(!refresh_tokens_match("abc", "abd"));
        assert!(!refresh_tokens_match("abc", ""));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic dXNlcjpwYXNz"), None);
    }
}
