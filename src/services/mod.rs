//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 생성되어 [`AppState`](crate::state::AppState)를 통해
//! 핸들러와 인증 미들웨어에 공유됩니다.
//!
//! - [`auth`] - 토큰 코덱, 세션 생존 검사, 세션 제공자
//! - [`identity`] - 자격 증명 저장소, 로그인/회원가입/갱신, 현재 사용자 서비스
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::identity::IdentityService;
//!
//! let tokens = state.identity.login(&request).await?;
//! ```

pub mod auth;
pub mod identity;
