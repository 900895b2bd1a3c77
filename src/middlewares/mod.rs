//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - 세션 제공자(Bearer 헤더, 쿠키)에서 액세스 토큰 추출
//! - 서명/발급자/대상/만료 검증 후 세션 생존 검사 (계정 존재, 잠금, 보안 스탬프)
//! - 통과한 요청 주체를 request extension에 저장
//! - 스코프별 필수 역할 지원 (`required_with_role`)
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 토큰 없음 / 검증 실패 / 세션 거부 | 401 problem 응답 |
//! | 역할 요구사항 불충족 | 403 problem 응답 |
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .service(
//!         web::scope("/api/me")
//!             .wrap(AuthMiddleware::required())
//!             .service(handlers::me::get_me)
//!     )
//!     .service(
//!         web::scope("/api/admin")
//!             .wrap(AuthMiddleware::required_with_role(ADMINISTRATOR))
//!             .service(handlers::admin::set_lockout)
//!     );
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
