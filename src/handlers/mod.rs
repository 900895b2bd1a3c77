//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청 DTO를 `validator`로 검증한 뒤 [`AppState`](crate::state::AppState)의
//! 서비스를 호출하고, 서비스 에러는 `AppError`의 `ResponseError` 구현을 통해 problem 응답이 됩니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Middlewares - 세션 인증, 역할 검사
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 신원/토큰/세션 로직                   ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories / Storage / Email                ← Infrastructure
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 핸들러 패턴
//!
//! ```rust,ignore
//! #[post("/login")]
//! pub async fn login(
//!     state: web::Data<AppState>,
//!     payload: web::Json<LoginRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;
//!     let tokens = state.identity.login(&payload).await?;
//!     Ok(HttpResponse::Ok().json(tokens))
//! }
//! ```
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 로그인, 갱신, 회원가입, 이메일 확인, 로그아웃
//! - [`me`] - 현재 사용자 프로필, 비밀번호 변경, 프로필 이미지
//! - [`admin`] - 관리자 계정 잠금

pub mod admin;
pub mod auth;
pub mod me;
