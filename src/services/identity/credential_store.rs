//! 자격 증명 저장소
//!
//! 계정 조회, 비밀번호 검증, 잠금 상태, 보안 스탬프, 리프레시 토큰 상태,
//! 역할 할당을 담당합니다. 영속화는 [`AccountRepository`]에 위임합니다.
//!
//! # 보안 스탬프를 교체하는 연산
//!
//! | 연산 | 교체 |
//! |------|------|
//! | 계정 생성 | 새 스탬프 |
//! | 로그인 성공 ([`CredentialStore::update_security_stamp`]) | ✓ |
//! | 비밀번호 변경 | ✓ |
//! | 역할 할당 | ✓ |
//! | 관리자 잠금 설정/해제 | ✓ |
//! | 리프레시 토큰 저장/삭제, 실패 횟수 기록 | ✗ |

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use rand::RngCore;
use rand::rngs::OsRng;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::config::LockoutPolicy;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{
    new_security_stamp, normalize_key, Account, Role, StoredRefreshToken,
};
use crate::repositories::accounts::{
    duplicate_email_message, duplicate_user_name_message, AccountChanges, AccountRepository,
};
use crate::services::identity::password_policy::PasswordPolicy;

/// 존재하지 않는 계정에 대한 비밀번호 비교에 사용하는 입력값
const DUMMY_PASSWORD: &str = "dummy-password-for-timing-equalization";

pub struct CredentialStore {
    repository: Arc<dyn AccountRepository>,
    password_policy: PasswordPolicy,
    lockout_policy: LockoutPolicy,
    bcrypt_cost: u32,
    dummy_hash: OnceCell<String>,
}

impl CredentialStore {
    pub fn new(repository: Arc<dyn AccountRepository>, bcrypt_cost: u32, lockout_policy: LockoutPolicy) -> Self {
        Self {
            repository,
            password_policy: PasswordPolicy::default(),
            lockout_policy,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    // ---------------------------------------------------------------
    // 조회
    // ---------------------------------------------------------------

    /// 대소문자 구분 없이 사용자 이름으로 조회합니다. 없으면 `Ok(None)`.
    pub async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<Account>> {
        self.repository.find_by_normalized_user_name(&normalize_key(user_name)).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>> {
        self.repository.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.repository.find_by_normalized_email(&normalize_key(email)).await
    }

    // ---------------------------------------------------------------
    // 비밀번호 / 잠금
    // ---------------------------------------------------------------

    /// 저장된 해시와 평문 비밀번호를 비교합니다.
    ///
    /// 틀린 비밀번호나 손상된 해시는 `false`로 처리하며 에러를 반환하지 않습니다.
    pub fn verify_password(&self, account: &Account, plaintext: &str) -> bool {
        let started = Instant::now();
        let verified = bcrypt::verify(plaintext, &account.password_hash).unwrap_or_else(|e| {
            log::warn!("비밀번호 해시 검증 오류 (계정 {}): {}", account.id, e);
            false
        });
        log::debug!("Password verification took: {:?}", started.elapsed());
        verified
    }

    /// 계정이 없을 때도 같은 비용의 bcrypt 비교를 수행해 응답 시간을 맞춥니다.
    pub fn verify_password_for_missing_account(&self, plaintext: &str) -> bool {
        let dummy = self
            .dummy_hash
            .get_or_init(|| bcrypt::hash(DUMMY_PASSWORD, self.bcrypt_cost).unwrap_or_default());
        let _ = bcrypt::verify(plaintext, dummy);
        false
    }

    pub fn is_locked_out(&self, account: &Account) -> bool {
        account.is_locked_out_at(Utc::now())
    }

    /// 로그인 실패를 기록합니다. 이번 실패로 계정이 잠겼으면 `true`.
    ///
    /// 실패 횟수는 저장소에서 원자적으로 증가하므로 동시에 들어온 실패도 모두 집계됩니다.
    pub async fn record_failed_access(&self, account: &mut Account) -> AppResult<bool> {
        if !self.lockout_policy.enabled() {
            return Ok(false);
        }

        let failed_count = self.repository.increment_access_failed_count(&account.id).await?;
        account.access_failed_count = failed_count;

        if failed_count < self.lockout_policy.max_failed_attempts {
            return Ok(false);
        }

        self.lock_out_until(account, Utc::now() + self.lockout_policy.duration).await?;
        log::warn!("🔒 로그인 실패 누적으로 계정 잠금: {} ({}회)", account.user_name, failed_count);
        Ok(true)
    }

    /// 실패 누적에 의한 잠금. 보안 스탬프는 유지합니다.
    pub(crate) async fn lock_out_until(&self, account: &mut Account, until: DateTime<Utc>) -> AppResult<()> {
        let changes = AccountChanges {
            lockout_end: Some(Some(until)),
            access_failed_count: Some(0),
            ..Default::default()
        };
        self.save(account, changes).await
    }

    pub async fn reset_access_failed_count(&self, account: &mut Account) -> AppResult<()> {
        let changes = AccountChanges {
            access_failed_count: Some(0),
            ..Default::default()
        };
        self.save(account, changes).await
    }

    /// 잠금 해제 시각을 설정(또는 `None`으로 해제)하고 보안 스탬프를 교체합니다.
    pub async fn set_lockout_end(&self, account: &mut Account, until: Option<DateTime<Utc>>) -> AppResult<()> {
        let changes = AccountChanges {
            lockout_end: Some(until),
            access_failed_count: Some(0),
            security_stamp: Some(new_security_stamp()),
            ..Default::default()
        };
        self.save(account, changes).await
    }

    // ---------------------------------------------------------------
    // 생성 / 변경
    // ---------------------------------------------------------------

    /// 새 계정을 생성합니다.
    ///
    /// 사용자 이름/이메일 중복과 비밀번호 정책 위반을 모두 모아 하나의 `ValidationError`로 반환합니다.
    pub async fn create(&self, mut account: Account, plaintext: &str) -> AppResult<Account> {
        let mut errors = Vec::new();

        if self.repository.find_by_normalized_user_name(&account.normalized_user_name).await?.is_some() {
            errors.push(duplicate_user_name_message(&account.user_name));
        }
        if self.repository.find_by_normalized_email(&account.normalized_email).await?.is_some() {
            errors.push(duplicate_email_message(&account.email));
        }
        errors.extend(self.password_policy.validate(plaintext));

        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        account.password_hash = self.hash_password(plaintext)?;
        account.security_stamp = new_security_stamp();
        account.touch();

        self.repository.insert(&account).await?;
        log::info!("계정 생성: {} ({})", account.user_name, account.id);

        Ok(account)
    }

    /// 변경된 필드만 저장소에 기록한 뒤 호출자의 계정 사본에도 반영합니다.
    async fn save(&self, account: &mut Account, changes: AccountChanges) -> AppResult<()> {
        self.repository.update_fields(&account.id, &changes).await?;
        changes.apply(account);
        account.touch();
        Ok(())
    }

    /// 새 보안 스탬프를 생성해 저장합니다. 이전 스탬프를 가진 액세스 토큰은 모두 무효가 됩니다.
    pub async fn update_security_stamp(&self, account: &mut Account) -> AppResult<()> {
        let changes = AccountChanges {
            security_stamp: Some(new_security_stamp()),
            ..Default::default()
        };
        self.save(account, changes).await
    }

    /// 현재 비밀번호를 확인한 뒤 새 비밀번호로 교체합니다.
    ///
    /// 보안 스탬프를 교체하고 리프레시 토큰을 삭제하므로 기존 세션은 모두 종료됩니다.
    pub async fn change_password(&self, account: &mut Account, current: &str, new_password: &str) -> AppResult<()> {
        if !self.verify_password(account, current) {
            return Err(AppError::validation("Incorrect password."));
        }

        let errors = self.password_policy.validate(new_password);
        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        let changes = AccountChanges {
            password_hash: Some(self.hash_password(new_password)?),
            security_stamp: Some(new_security_stamp()),
            refresh_token: Some(None),
            ..Default::default()
        };
        self.save(account, changes).await
    }

    fn hash_password(&self, plaintext: &str) -> AppResult<String> {
        let started = Instant::now();
        let hash = bcrypt::hash(plaintext, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", started.elapsed());
        Ok(hash)
    }

    // ---------------------------------------------------------------
    // 리프레시 토큰
    // ---------------------------------------------------------------

    /// 리프레시 토큰과 만료 시각을 함께 저장합니다. 이전 토큰은 덮어씁니다.
    pub async fn set_refresh_token(&self, account: &mut Account, token: String, expires_at: DateTime<Utc>) -> AppResult<()> {
        let changes = AccountChanges {
            refresh_token: Some(Some(StoredRefreshToken { token, expires_at })),
            ..Default::default()
        };
        self.save(account, changes).await
    }

    /// 리프레시 토큰과 만료 시각을 함께 삭제합니다.
    pub async fn clear_refresh_token(&self, account: &mut Account) -> AppResult<()> {
        let changes = AccountChanges {
            refresh_token: Some(None),
            ..Default::default()
        };
        self.save(account, changes).await
    }

    // ---------------------------------------------------------------
    // 이메일 확인
    // ---------------------------------------------------------------

    /// 이메일 확인 토큰을 생성해 계정에 저장하고 반환합니다.
    pub async fn generate_email_confirmation_token(&self, account: &mut Account) -> AppResult<String> {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        let changes = AccountChanges {
            email_confirmation_token: Some(Some(token.clone())),
            ..Default::default()
        };
        self.save(account, changes).await?;
        Ok(token)
    }

    pub async fn confirm_email(&self, account: &mut Account, token: &str) -> AppResult<()> {
        let matches = account
            .email_confirmation_token
            .as_deref()
            .is_some_and(|expected| crate::services::auth::refresh_tokens_match(expected, token));

        if !matches {
            return Err(AppError::validation("Invalid token."));
        }

        let changes = AccountChanges {
            email_confirmed: Some(true),
            email_confirmation_token: Some(None),
            ..Default::default()
        };
        self.save(account, changes).await
    }

    // ---------------------------------------------------------------
    // 프로필
    // ---------------------------------------------------------------

    /// 프로필 이미지 경로를 기록(또는 `None`으로 삭제)합니다.
    pub async fn set_profile_image_path(&self, account: &mut Account, path: Option<String>) -> AppResult<()> {
        let changes = AccountChanges {
            profile_image_path: Some(path),
            ..Default::default()
        };
        self.save(account, changes).await
    }

    // ---------------------------------------------------------------
    // 역할
    // ---------------------------------------------------------------

    /// 역할이 없으면 생성합니다. 새로 생성했으면 `true`.
    pub async fn ensure_role(&self, name: &str) -> AppResult<bool> {
        if self.repository.find_role_by_normalized_name(&normalize_key(name)).await?.is_some() {
            return Ok(false);
        }
        self.repository.insert_role(&Role::new(name)).await?;
        Ok(true)
    }

    /// 계정에 역할을 할당하고 보안 스탬프를 교체합니다.
    pub async fn assign_role(&self, account: &mut Account, role_name: &str) -> AppResult<()> {
        let role = self
            .repository
            .find_role_by_normalized_name(&normalize_key(role_name))
            .await?
            .ok_or_else(|| AppError::validation(format!("Role {} does not exist.", role_name)))?;

        self.repository.add_to_role(&account.id, &role.id).await?;
        self.update_security_stamp(account).await
    }

    /// 계정의 역할 이름 목록 (할당 순서)
    pub async fn roles_of(&self, account: &Account) -> AppResult<Vec<String>> {
        self.repository.roles_of(&account.id).await
    }
}
