//! # Domain Layer Module
//!
//! 신원 도메인의 데이터 구조를 담당하는 모듈입니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities      - 저장소에 영속되는 계정, 역할, 역할 할당
//! ├── DTOs          - HTTP 요청/응답 본문 (camelCase JSON)
//! └── Models        - 토큰 클레임, 인증된 요청 주체
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, Storage, Email)
//! ```
//!
//! 하위 모듈의 공개 타입은 `crate::domain::*`으로 재노출됩니다.
//!
//! ```rust,ignore
//! use crate::domain::{Account, ClaimSet, LoginRequest, AuthenticatedUser};
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::auth::*;
pub use models::token::*;
