//! 프로세스 메모리 계정 저장소
//!
//! 단일 `RwLock` 아래에서 모든 변경이 직렬화되므로 MongoDB 구현과 같은
//! 유일성 보장(정규화 사용자 이름, 정규화 이메일, 역할 할당 쌍)을 제공합니다.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{duplicate_email_message, duplicate_user_name_message, AccountChanges, AccountRepository};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{Account, Role, UserRole};

#[derive(Default)]
struct MemoryState {
    accounts: HashMap<String, Account>,
    roles: Vec<Role>,
    user_roles: Vec<UserRole>,
}

impl MemoryState {
    fn conflicts(&self, account: &Account) -> Vec<String> {
        let others = || self.accounts.values().filter(|other| other.id != account.id);

        let mut errors = Vec::new();
        if others().any(|other| other.normalized_user_name == account.normalized_user_name) {
            errors.push(duplicate_user_name_message(&account.user_name));
        }
        if others().any(|other| other.normalized_email == account.normalized_email) {
            errors.push(duplicate_email_message(&account.email));
        }
        errors
    }
}

#[derive(Default)]
pub struct InMemoryAccountRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| AppError::InternalError("account store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| AppError::InternalError("account store lock poisoned".to_string()))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>> {
        Ok(self.read()?.accounts.get(id).cloned())
    }

    async fn find_by_normalized_user_name(&self, normalized_user_name: &str) -> AppResult<Option<Account>> {
        Ok(self
            .read()?
            .accounts
            .values()
            .find(|account| account.normalized_user_name == normalized_user_name)
            .cloned())
    }

    async fn find_by_normalized_email(&self, normalized_email: &str) -> AppResult<Option<Account>> {
        Ok(self
            .read()?
            .accounts
            .values()
            .find(|account| account.normalized_email == normalized_email)
            .cloned())
    }

    async fn insert(&self, account: &Account) -> AppResult<()> {
        let mut state = self.write()?;

        if state.accounts.contains_key(&account.id) {
            return Err(AppError::InternalError(format!("account id {} already exists", account.id)));
        }

        let conflicts = state.conflicts(account);
        if !conflicts.is_empty() {
            return Err(AppError::ValidationError(conflicts));
        }

        state.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn update_fields(&self, id: &str, changes: &AccountChanges) -> AppResult<()> {
        let mut state = self.write()?;
        let account = state
            .accounts
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        changes.apply(account);
        account.touch();
        Ok(())
    }

    async fn increment_access_failed_count(&self, id: &str) -> AppResult<u32> {
        let mut state = self.write()?;
        let account = state
            .accounts
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        account.access_failed_count += 1;
        account.touch();
        Ok(account.access_failed_count)
    }

    async fn find_role_by_normalized_name(&self, normalized_name: &str) -> AppResult<Option<Role>> {
        Ok(self
            .read()?
            .roles
            .iter()
            .find(|role| role.normalized_name == normalized_name)
            .cloned())
    }

    async fn insert_role(&self, role: &Role) -> AppResult<()> {
        let mut state = self.write()?;

        if state.roles.iter().any(|existing| existing.normalized_name == role.normalized_name) {
            return Err(AppError::validation(format!("Role name '{}' is already taken.", role.name)));
        }

        state.roles.push(role.clone());
        Ok(())
    }

    async fn add_to_role(&self, user_id: &str, role_id: &str) -> AppResult<()> {
        let mut state = self.write()?;

        let assigned = state
            .user_roles
            .iter()
            .any(|assignment| assignment.user_id == user_id && assignment.role_id == role_id);

        if !assigned {
            state.user_roles.push(UserRole {
                user_id: user_id.to_string(),
                role_id: role_id.to_string(),
            });
        }
        Ok(())
    }

    async fn roles_of(&self, user_id: &str) -> AppResult<Vec<String>> {
        let state = self.read()?;

        Ok(state
            .user_roles
            .iter()
            .filter(|assignment| assignment.user_id == user_id)
            .filter_map(|assignment| state.roles.iter().find(|role| role.id == assignment.role_id))
            .map(|role| role.name.clone())
            .collect())
    }
}
