//! # Application Error Handling System
//!
//! 인증/신원 서비스 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! 서비스 계층의 실패는 모두 예상 가능한 사용자 대상 결과로 모델링되며,
//! `actix_web::ResponseError` 구현을 통해 표준 problem 응답으로 변환됩니다.
//!
//! ## 에러 분류
//!
//! | 변형 | HTTP 상태 | 클라이언트 메시지 |
//! |------|-----------|-------------------|
//! | `ValidationError` | 400 | 필드 단위 메시지 목록 |
//! | `AuthenticationError` | 400 | 의도적으로 일반화된 메시지 |
//! | `NotFound` | 404 | 리소스 없음 메시지 |
//! | `DatabaseError` / `StorageError` / `ExternalServiceError` / `InternalError` | 500 | 일반 메시지 (상세 내용은 로그에만 기록) |
//!
//! 인증 실패를 401이 아닌 400으로 응답하는 것은 로그인/갱신 엔드포인트의 계약입니다.
//! 보호된 라우트에 유효한 세션 없이 접근하는 경우는 미들웨어가 401을 직접 응답합니다.
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "type": "https://httpstatuses.io/400",
//!   "title": "Bad Request",
//!   "status": 400,
//!   "errors": ["Invalid username or password"]
//! }
//! ```
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, ErrorContext};
//!
//! let account = store.find_by_user_name(&name).await?
//!     .ok_or_else(|| AppError::not_found("Account not found"))?;
//!
//! let bytes = tokio::fs::read(path).await.context("프로필 이미지 읽기 실패")?;
//! ```

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

/// 서버 내부 오류 시 클라이언트에게 노출되는 고정 메시지
pub const GENERIC_SERVER_ERROR: &str = "An unexpected error occurred";

/// 애플리케이션 전역 에러 타입
///
/// 검증/인증 실패는 여러 개의 메시지를 함께 전달할 수 있도록 `Vec<String>`을 보관합니다.
/// 인프라 계층 에러는 상세 원인을 문자열로 보관하되 응답에는 노출하지 않습니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 실패 (중복 계정, 비밀번호 정책 위반, 형식 오류 등)
    #[error("Validation error: {}", .0.join(", "))]
    ValidationError(Vec<String>),

    /// 인증 실패 (잘못된 자격 증명, 잘못된 토큰 등)
    ///
    /// 계정 열거 공격을 막기 위해 메시지는 항상 일반화되어 있어야 합니다.
    #[error("Authentication error: {}", .0.join(", "))]
    AuthenticationError(Vec<String>),

    /// 요청한 리소스가 존재하지 않음
    #[error("Not found: {0}")]
    NotFound(String),

    /// MongoDB 등 계정 저장소 연산 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 파일/블롭 스토리지 연산 실패
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 이메일 등 외부 협력자 호출 실패
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 예상하지 못한 시스템 오류
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 단일 메시지 검증 에러 생성
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError(vec![message.into()])
    }

    /// 단일 메시지 인증 에러 생성
    pub fn authentication(message: impl Into<String>) -> Self {
        AppError::AuthenticationError(vec![message.into()])
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    /// HTTP 상태 코드 매핑
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 클라이언트에게 전달할 메시지 목록
    ///
    /// 서버 측 에러의 상세 내용은 포함하지 않습니다.
    pub fn client_messages(&self) -> Vec<String> {
        match self {
            AppError::ValidationError(messages) | AppError::AuthenticationError(messages) => {
                messages.clone()
            }
            AppError::NotFound(message) => vec![message.clone()],
            _ => vec![GENERIC_SERVER_ERROR.to_string()],
        }
    }
}

/// 표준 problem 응답 본문
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub errors: Vec<String>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, errors: Vec<String>) -> Self {
        Self {
            problem_type: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            errors,
        }
    }

    /// 상태 코드와 problem 본문을 담은 HTTP 응답 생성
    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        if status.is_server_error() {
            log::error!("요청 처리 중 서버 오류: {}", self);
        }

        ProblemDetails::new(status, self.client_messages()).into_response()
    }
}

/// `validator` 크레이트의 검증 결과를 필드 메시지 목록으로 변환합니다.
///
/// 메시지가 지정되지 않은 규칙은 `"{field} is invalid"` 형태로 대체됩니다.
/// 응답이 매번 같은 순서가 되도록 필드 이름 순으로 정렬합니다.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages = fields
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();

        AppError::ValidationError(messages)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 컨텍스트를 붙여 `InternalError`로 변환하는 확장 trait
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
