//! # Data & Runtime Configuration
//!
//! 실행 환경, 서버 바인딩, 비밀번호 해시 비용, 계정 저장소 백엔드,
//! 파일 스토리지 경로 설정을 제공합니다.
//!
//! | 환경 변수 | 기본값 | 설명 |
//! |-----------|--------|------|
//! | `ENVIRONMENT` | `production` | development / test / staging / production |
//! | `HOST` / `PORT` | `127.0.0.1` / `8080` | 서버 바인딩 주소 |
//! | `BCRYPT_COST` | 환경별 (4/4/10/12) | bcrypt 해시 비용 (4~15) |
//! | `STORE_BACKEND` | `mongodb` | `mongodb` 또는 `memory` |
//! | `STORAGE_SITE_ROOT` | `.` | 상대 경로 스토리지의 기준 디렉터리 |
//! | `STORAGE_FOLDER` | `storage` | 블롭 저장 폴더 |

use std::env;
use std::path::PathBuf;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        Self::from_name(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해시 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt 비용을 반환합니다.
    ///
    /// `BCRYPT_COST`가 4~15 범위의 값이면 그대로 사용하고,
    /// 그렇지 않으면 현재 환경에 맞는 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        super::env_parse("PORT", 8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분) 또는 로컬 개발용 기본 Origin 목록
    pub fn cors_allowed_origins() -> Vec<String> {
        match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => split_origins(&raw),
            Err(_) => vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// 요청 속도 제한 설정
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_env() -> Self {
        Self {
            per_second: super::env_parse("RATE_LIMIT_PER_SECOND", 100),
            burst_size: super::env_parse("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}

/// 계정 저장소 백엔드 종류
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// MongoDB 컬렉션 (`users`, `roles`, `user_roles`)
    MongoDb,
    /// 프로세스 메모리 (개발/테스트 전용, 재시작 시 소실)
    Memory,
}

impl StoreBackend {
    pub fn current() -> Self {
        Self::from_name(&env::var("STORE_BACKEND").unwrap_or_else(|_| "mongodb".to_string()))
    }

    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StoreBackend::Memory,
            _ => StoreBackend::MongoDb,
        }
    }
}

/// 파일 시스템 스토리지 설정
pub struct StorageConfig;

impl StorageConfig {
    pub fn site_root() -> PathBuf {
        PathBuf::from(env::var("STORAGE_SITE_ROOT").unwrap_or_else(|_| ".".to_string()))
    }

    pub fn storage_folder() -> PathBuf {
        PathBuf::from(env::var("STORAGE_FOLDER").unwrap_or_else(|_| "storage".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name("DEV"), Environment::Development);
        assert_eq!(Environment::from_name("test"), Environment::Test);
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_store_backend_from_name() {
        assert_eq!(StoreBackend::from_name("memory"), StoreBackend::Memory);
        assert_eq!(StoreBackend::from_name("MongoDB"), StoreBackend::MongoDb);
        assert_eq!(StoreBackend::from_name(""), StoreBackend::MongoDb);
    }

    #[test]
    fn test_split_origins_skips_blanks() {
        assert_eq!(
            split_origins(" https://a.example , ,https://b.example,"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "127.0.0.1");
        }
    }
}
