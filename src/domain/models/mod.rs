//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델과 값 객체를 정의합니다.
//!
//! ## Entities vs Models 구분
//!
//! - **Entities** (`../entities/`): 저장소에 영속되는 계정/역할 문서
//! - **Models** (`./`): 토큰 클레임, 인증된 요청 주체 등 요청 범위의 값 객체
//!
//! ## 모듈 구성
//!
//! - [`token`] - 순서가 고정된 클레임 목록과 토큰 응답
//! - [`auth`] - 인증된 사용자 추출자와 인증 모드/역할 요구사항

pub mod auth;
pub mod token;
