//! Accounts Entity Module
//!
//! 등록된 사용자 계정과 역할(권한 그룹) 엔티티를 포함합니다.
//!
//! # 주요 구성 요소
//!
//! - [`account::Account`] - 자격 증명, 프로필, 보안 스탬프, 잠금 상태, 리프레시 토큰 상태
//! - [`role::Role`] - 이름이 있는 권한 그룹 (Administrator, PowerUser, User)
//! - [`role::UserRole`] - 계정과 역할의 다대다 할당

pub mod account;
pub mod role;

pub use account::*;
pub use role::*;
