//! 요청 인증 모델
//!
//! 인증 미들웨어가 Request Extensions에 저장하는 [`authenticated_user::AuthenticatedUser`]를 제공합니다.

pub mod authenticated_user;

pub use authenticated_user::*;
