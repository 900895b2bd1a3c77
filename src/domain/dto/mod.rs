//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문을 표현하는 DTO 모듈입니다.
//! 모든 JSON 필드는 camelCase이며, 요청 DTO는 `validator`로 서비스 진입 전에 검증됩니다.
//!
//! ## 모듈 구성
//!
//! - [`accounts`] - 로그인, 회원가입, 비밀번호 변경, 이메일 확인, 계정 잠금 요청과 사용자 응답
//! - [`tokens`] - 토큰 갱신 요청
//!
//! ## 검증 흐름
//!
//! ```rust,ignore
//! #[post("/login")]
//! pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
//!     payload.validate()?; // ValidationErrors → AppError::ValidationError (400)
//!     // ...
//! }
//! ```

pub mod accounts;
pub mod tokens;

pub use accounts::*;
pub use tokens::*;
