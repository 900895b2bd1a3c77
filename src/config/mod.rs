//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리하며,
//! `PROFILE`에 따라 `.env.dev` / `.env.prod` 파일에서 값을 불러옵니다 (`main.rs` 참고).
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 비밀번호 해시, 저장소 백엔드, 파일 스토리지 설정
//! - [`auth_config`] - JWT, 계정 잠금, 쿠키 세션, 기본 관리자 계정 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전 (서명 키 기본값 사용 시 경고 로그)
//! - 파싱 실패 시 기본값으로 대체하고 경고 로그 출력
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, JwtConfig, ServerConfig};
//!
//! let env = Environment::current();
//! let bind = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
//! let jwt = JwtConfig::settings();
//! ```

use std::str::FromStr;

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;

/// 환경 변수를 읽어 파싱하고, 없거나 파싱에 실패하면 기본값을 반환합니다.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_or_default(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or_default<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            log::warn!("{} 파싱 실패: '{}'. 기본값 {} 사용", key, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default() {
        assert_eq!(parse_or_default("X", "42", 7i64), 42);
        assert_eq!(parse_or_default("X", " 42 ", 7i64), 42);
        assert_eq!(parse_or_default("X", "forty", 7i64), 7);
        assert!(parse_or_default("X", "true", false));
    }

    #[test]
    fn test_env_parse_missing_key_uses_default() {
        assert_eq!(env_parse("IDENTITY_TEST_SURELY_UNSET_KEY", 15u32), 15);
    }
}
