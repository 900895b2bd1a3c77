//! 신원 서비스 백엔드
//!
//! 사용자 계정, 비밀번호 로그인, JWT 액세스 토큰과 리프레시 토큰 회전,
//! 그리고 보안 스탬프 기반의 세션 즉시 폐기를 제공하는 인증 서비스입니다.
//!
//! # Features
//!
//! - **자격 증명 저장소**: bcrypt 해시, 비밀번호 정책, 실패 횟수 기반 계정 잠금
//! - **토큰 코덱**: HS256 액세스 토큰 서명/검증, 불투명 리프레시 토큰 생성
//! - **세션 생존 검사**: 매 요청마다 보안 스탬프와 잠금 상태를 확인
//! - **세션 제공자**: Bearer 헤더와 HttpOnly 쿠키를 동시에 지원
//! - **저장소 백엔드**: MongoDB 또는 메모리
//! - **프로필 이미지**: 파일 시스템 블롭 저장소
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Middlewares   │ ← 세션 추출, 생존 검사, 역할 검사
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 신원/토큰/세션 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 계정 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB/Memory  │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use identity_service_backend::services::identity::IdentityService;
//!
//! let tokens = identity.login(&LoginRequest {
//!     user_name: "alice".into(),
//!     password: "Secret1!".into(),
//! }).await?;
//!
//! let refreshed = identity.refresh_token(&RefreshTokenRequest {
//!     access_token: tokens.access_token,
//!     refresh_token: tokens.refresh_token,
//! }).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod email;
pub mod repositories;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
