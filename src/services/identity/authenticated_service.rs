//! 현재 사용자("me") 서비스
//!
//! 인증된 요청 주체의 프로필 조회와 프로필 이미지 관리를 담당합니다.
//! 프로필 이미지는 스토리지의 `profiles/{account_id}` 경로에 저장됩니다.

use std::sync::Arc;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::UserResponse;
use crate::domain::entities::Account;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::identity::CredentialStore;
use crate::storage::StorageProvider;

pub struct AuthenticatedService {
    store: Arc<CredentialStore>,
    storage: Arc<dyn StorageProvider>,
}

impl AuthenticatedService {
    pub fn new(store: Arc<CredentialStore>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { store, storage }
    }

    /// 요청 주체의 프로필
    pub async fn get_me(&self, user: &AuthenticatedUser) -> AppResult<UserResponse> {
        let account = self.current_account(user).await?;
        Ok(UserResponse::from(&account))
    }

    pub async fn upload_profile_image(&self, user: &AuthenticatedUser, content: &[u8]) -> AppResult<()> {
        if content.is_empty() {
            return Err(AppError::validation("Image content is required"));
        }

        let mut account = self.current_account(user).await?;
        let path = profile_image_path(&account.id);

        self.storage.upload_bytes(content, &path, true).await?;

        self.store.set_profile_image_path(&mut account, Some(path)).await?;
        log::info!("프로필 이미지 저장: {} ({} bytes)", account.user_name, content.len());
        Ok(())
    }

    pub async fn read_profile_image(&self, user: &AuthenticatedUser) -> AppResult<Vec<u8>> {
        let account = self.current_account(user).await?;
        let path = account
            .profile_image_path
            .ok_or_else(|| AppError::not_found("Profile image not found"))?;

        self.storage
            .read_as_bytes(&path)
            .await?
            .ok_or_else(|| AppError::not_found("Profile image not found"))
    }

    pub async fn delete_profile_image(&self, user: &AuthenticatedUser) -> AppResult<()> {
        let mut account = self.current_account(user).await?;
        let Some(path) = account.profile_image_path.clone() else {
            return Err(AppError::not_found("Profile image not found"));
        };

        self.storage.delete(&path).await?;
        self.store.set_profile_image_path(&mut account, None).await?;
        log::info!("프로필 이미지 삭제: {}", account.user_name);
        Ok(())
    }

    async fn current_account(&self, user: &AuthenticatedUser) -> AppResult<Account> {
        self.store
            .find_by_user_name(&user.user_name)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

fn profile_image_path(account_id: &str) -> String {
    format!("profiles/{}", account_id)
}
