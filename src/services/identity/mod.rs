//! 신원 서비스 모듈
//!
//! 자격 증명 저장소와 그 위에서 동작하는 로그인/회원가입/토큰 갱신 흐름,
//! 현재 사용자 프로필 서비스, 시작 시 시딩을 제공합니다.
//!
//! ```text
//! IdentityService ──┬──> CredentialStore ──> AccountRepository (MongoDB / Memory)
//!                   ├──> TokenCodec
//!                   └──> EmailSender
//! AuthenticatedService ──> CredentialStore, StorageProvider
//! ```

pub mod authenticated_service;
pub mod credential_store;
pub mod identity_service;
pub mod password_policy;
pub mod startup;

pub use authenticated_service::AuthenticatedService;
pub use credential_store::CredentialStore;
pub use identity_service::IdentityService;
pub use password_policy::PasswordPolicy;
pub use startup::{seed_identity, SeedReport};
