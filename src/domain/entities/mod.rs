//! # Domain Entities Module
//!
//! 신원 도메인의 핵심 엔티티들을 정의합니다.
//! 저장소 백엔드(MongoDB 또는 메모리)에 그대로 저장되는 문서 구조체입니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 이 모듈 (계정, 역할, 역할 할당)
//! ├── models/       ← 클레임, 인증된 사용자 등 값 객체
//! └── dto/          ← 요청/응답 데이터 전송 객체
//! ```
//!
//! ## 엔티티 관계
//!
//! ```text
//! Account 1 ──── * UserRole * ──── 1 Role
//!          (user_id, role_id) 쌍은 유일
//! ```

pub mod accounts;

pub use accounts::*;
