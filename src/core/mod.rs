//! # Core Module
//!
//! 서비스 전역에서 공유하는 핵심 타입을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **ProblemDetails**: 표준 problem 응답 본문
//! - **HTTP 통합**: Actix-Web ResponseError 구현
//! - **ErrorContext**: 외부 에러에 컨텍스트를 붙이는 확장 trait

pub mod errors;

pub use errors::*;
