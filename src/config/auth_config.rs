//! # Authentication Configuration
//!
//! 토큰 발급, 계정 잠금, 세션 제공자 관련 설정을 관리합니다.
//!
//! ## 환경 변수
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECURITY_KEY="at-least-32-bytes-of-secret-material"
//! export JWT_ISSUER="identity-service"
//! export JWT_AUDIENCE="identity-service"
//! export JWT_ACCESS_TOKEN_EXPIRATION_MINUTES="60"
//! export JWT_REFRESH_TOKEN_EXPIRATION_MINUTES="10080"
//! ```
//!
//! ### 계정 잠금 설정
//! ```bash
//! export LOCKOUT_MAX_FAILED_ATTEMPTS="5"   # 0이면 잠금 비활성화
//! export LOCKOUT_DURATION_MINUTES="15"
//! ```
//!
//! ### 쿠키 세션 (웹 페이지용 보조 세션)
//! ```bash
//! export SESSION_COOKIE_ENABLED="true"
//! export SESSION_COOKIE_NAME="access_token"
//! ```
//!
//! ### 기본 관리자 계정 (선택)
//! ```bash
//! export DEFAULT_ADMIN_USERNAME="admin"
//! export DEFAULT_ADMIN_EMAIL="admin@example.com"
//! export DEFAULT_ADMIN_PASSWORD="Adm1n!Passw0rd"
//! ```

use std::env;

use chrono::Duration;

use super::env_parse;

/// 토큰 코덱이 사용하는 JWT 발급/검증 파라미터 묶음
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// HMAC-SHA256 서명 키
    pub security_key: String,
    pub issuer: String,
    pub audience: String,
    /// 액세스 토큰 유효 기간
    pub access_token_ttl: Duration,
    /// 리프레시 토큰 유효 기간
    pub refresh_token_ttl: Duration,
}

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명 키를 반환합니다.
    ///
    /// 설정되지 않은 경우 개발용 기본값을 사용하며 경고 로그를 남깁니다.
    pub fn security_key() -> String {
        env::var("JWT_SECURITY_KEY").unwrap_or_else(|_| {
            log::warn!("JWT_SECURITY_KEY not set, using default (not secure for production!)");
            "development-only-security-key-change-me".to_string()
        })
    }

    pub fn issuer() -> String {
        env::var("JWT_ISSUER").unwrap_or_else(|_| "identity-service".to_string())
    }

    pub fn audience() -> String {
        env::var("JWT_AUDIENCE").unwrap_or_else(|_| "identity-service".to_string())
    }

    /// 액세스 토큰 만료 시간 (분, 기본값 60)
    pub fn access_token_expiration_minutes() -> i64 {
        env_parse("JWT_ACCESS_TOKEN_EXPIRATION_MINUTES", 60)
    }

    /// 리프레시 토큰 만료 시간 (분, 기본값 7일)
    pub fn refresh_token_expiration_minutes() -> i64 {
        env_parse("JWT_REFRESH_TOKEN_EXPIRATION_MINUTES", 60 * 24 * 7)
    }

    /// 현재 환경 변수로부터 [`JwtSettings`]를 구성합니다.
    pub fn settings() -> JwtSettings {
        JwtSettings {
            security_key: Self::security_key(),
            issuer: Self::issuer(),
            audience: Self::audience(),
            access_token_ttl: Duration::minutes(Self::access_token_expiration_minutes()),
            refresh_token_ttl: Duration::minutes(Self::refresh_token_expiration_minutes()),
        }
    }
}

/// 로그인 실패 누적에 따른 계정 잠금 정책
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockoutPolicy {
    /// 잠금까지 허용되는 연속 실패 횟수 (0이면 잠금 비활성화)
    pub max_failed_attempts: u32,
    pub duration: Duration,
}

impl LockoutPolicy {
    pub fn enabled(&self) -> bool {
        self.max_failed_attempts > 0
    }
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            duration: Duration::minutes(15),
        }
    }
}

pub struct LockoutConfig;

impl LockoutConfig {
    pub fn policy() -> LockoutPolicy {
        let defaults = LockoutPolicy::default();
        LockoutPolicy {
            max_failed_attempts: env_parse(
                "LOCKOUT_MAX_FAILED_ATTEMPTS",
                defaults.max_failed_attempts,
            ),
            duration: Duration::minutes(env_parse("LOCKOUT_DURATION_MINUTES", 15)),
        }
    }
}

/// 쿠키 기반 보조 세션 설정
pub struct SessionConfig;

impl SessionConfig {
    pub fn cookie_enabled() -> bool {
        env_parse("SESSION_COOKIE_ENABLED", false)
    }

    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "access_token".to_string())
    }
}

/// 시작 시 생성할 기본 관리자 계정 정보
#[derive(Debug, Clone)]
pub struct DefaultAdmin {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

pub struct DefaultAdminConfig;

impl DefaultAdminConfig {
    /// 세 값이 모두 설정된 경우에만 기본 관리자 정보를 반환합니다.
    pub fn from_env() -> Option<DefaultAdmin> {
        let user_name = env::var("DEFAULT_ADMIN_USERNAME").ok()?;
        let email = env::var("DEFAULT_ADMIN_EMAIL").ok()?;
        let password = env::var("DEFAULT_ADMIN_PASSWORD").ok()?;

        Some(DefaultAdmin {
            user_name,
            email,
            password,
        })
    }
}
