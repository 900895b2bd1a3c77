//! 계정 저장소 추상화
//!
//! 자격 증명 저장소(`CredentialStore`)가 사용하는 영속화 계약입니다.
//! 모든 조회 키는 [`normalize_key`](crate::domain::entities::normalize_key)로 정규화된 값입니다.
//!
//! 계정 변경은 문서 전체가 아니라 [`AccountChanges`]에 담긴 필드만 기록합니다.
//! 요청 중에 읽은 계정 사본이 다른 요청의 비밀번호/보안 스탬프 변경을 덮어쓰지 않습니다.
//!
//! | 구현 | 용도 |
//! |------|------|
//! | [`MongoAccountRepository`] | 운영 환경 (`users`, `roles`, `user_roles` 컬렉션) |
//! | [`InMemoryAccountRepository`] | 개발/테스트 환경 |

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::errors::AppResult;
use crate::domain::entities::{Account, Role, StoredRefreshToken};

pub mod memory_account_repo;
pub mod mongo_account_repo;

pub use memory_account_repo::InMemoryAccountRepository;
pub use mongo_account_repo::MongoAccountRepository;

/// 중복 사용자 이름 에러 메시지
pub fn duplicate_user_name_message(user_name: &str) -> String {
    format!("Username '{}' is already taken.", user_name)
}

/// 중복 이메일 에러 메시지
pub fn duplicate_email_message(email: &str) -> String {
    format!("Email '{}' is already taken.", email)
}

/// 계정 필드 단위 변경 집합
///
/// `None`인 필드는 기록하지 않습니다. 값을 비우는 변경은 `Some(None)`입니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountChanges {
    pub password_hash: Option<String>,
    pub security_stamp: Option<String>,
    pub access_failed_count: Option<u32>,
    pub lockout_end: Option<Option<DateTime<Utc>>>,
    pub refresh_token: Option<Option<StoredRefreshToken>>,
    pub email_confirmed: Option<bool>,
    pub email_confirmation_token: Option<Option<String>>,
    pub profile_image_path: Option<Option<String>>,
}

impl AccountChanges {
    /// 변경 내용을 메모리의 계정 사본에 반영합니다.
    pub fn apply(&self, account: &mut Account) {
        if let Some(password_hash) = &self.password_hash {
            account.password_hash = password_hash.clone();
        }
        if let Some(security_stamp) = &self.security_stamp {
            account.security_stamp = security_stamp.clone();
        }
        if let Some(count) = self.access_failed_count {
            account.access_failed_count = count;
        }
        if let Some(lockout_end) = self.lockout_end {
            account.lockout_end = lockout_end;
        }
        if let Some(refresh_token) = &self.refresh_token {
            account.refresh_token = refresh_token.clone();
        }
        if let Some(email_confirmed) = self.email_confirmed {
            account.email_confirmed = email_confirmed;
        }
        if let Some(token) = &self.email_confirmation_token {
            account.email_confirmation_token = token.clone();
        }
        if let Some(path) = &self.profile_image_path {
            account.profile_image_path = path.clone();
        }
    }
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>>;

    async fn find_by_normalized_user_name(&self, normalized_user_name: &str) -> AppResult<Option<Account>>;

    async fn find_by_normalized_email(&self, normalized_email: &str) -> AppResult<Option<Account>>;

    /// 새 계정 저장. 사용자 이름/이메일 중복 시 `ValidationError`.
    async fn insert(&self, account: &Account) -> AppResult<()>;

    /// 지정된 필드만 기록하고 `updated_at`을 갱신합니다. 존재하지 않으면 `NotFound`.
    async fn update_fields(&self, id: &str, changes: &AccountChanges) -> AppResult<()>;

    /// 로그인 실패 횟수를 원자적으로 1 증가시키고 증가된 값을 반환합니다. 존재하지 않으면 `NotFound`.
    async fn increment_access_failed_count(&self, id: &str) -> AppResult<u32>;

    async fn find_role_by_normalized_name(&self, normalized_name: &str) -> AppResult<Option<Role>>;

    async fn insert_role(&self, role: &Role) -> AppResult<()>;

    /// 역할 할당. 이미 할당되어 있으면 아무것도 하지 않습니다.
    async fn add_to_role(&self, user_id: &str, role_id: &str) -> AppResult<()>;

    /// 계정에 할당된 역할 이름 (할당 순서)
    async fn roles_of(&self, user_id: &str) -> AppResult<Vec<String>>;
}
