//! MongoDB 계정 저장소
//!
//! | 컬렉션 | 유니크 인덱스 |
//! |--------|---------------|
//! | `users` | `normalized_user_name`, `normalized_email` |
//! | `roles` | `normalized_name` |
//! | `user_roles` | `(user_id, role_id)` |
//!
//! 유일성은 인덱스가 최종 보장하며, 중복 키 에러(11000)는 `ValidationError`로 변환됩니다.
//! 계정 변경은 `$set`(변경 필드만)과 `$inc`(로그인 실패 횟수)로 기록합니다.

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use serde::Serialize;

use super::{duplicate_email_message, duplicate_user_name_message, AccountChanges, AccountRepository};
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::{Account, Role, UserRole};

const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct MongoAccountRepository {
    accounts: Collection<Account>,
    roles: Collection<Role>,
    user_roles: Collection<UserRole>,
}

impl MongoAccountRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            accounts: database.collection::<Account>("users"),
            roles: database.collection::<Role>("roles"),
            user_roles: database.collection::<UserRole>("user_roles"),
        }
    }

    /// 유니크 인덱스를 생성합니다. 이미 존재하면 그대로 둡니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let unique = |keys, name: &str| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).name(name.to_string()).build())
                .build()
        };

        self.accounts
            .create_indexes([
                unique(doc! { "normalized_user_name": 1 }, "normalized_user_name_unique"),
                unique(doc! { "normalized_email": 1 }, "normalized_email_unique"),
            ])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.roles
            .create_index(unique(doc! { "normalized_name": 1 }, "normalized_name_unique"))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.user_roles
            .create_index(unique(doc! { "user_id": 1, "role_id": 1 }, "user_role_unique"))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 중복 키 에러를 어떤 필드가 충돌했는지에 따라 검증 에러로 변환합니다.
    async fn duplicate_error(&self, account: &Account) -> AppError {
        let mut messages = Vec::new();

        if let Ok(Some(other)) = self.find_by_normalized_user_name(&account.normalized_user_name).await {
            if other.id != account.id {
                messages.push(duplicate_user_name_message(&account.user_name));
            }
        }
        if let Ok(Some(other)) = self.find_by_normalized_email(&account.normalized_email).await {
            if other.id != account.id {
                messages.push(duplicate_email_message(&account.email));
            }
        }

        if messages.is_empty() {
            messages.push(duplicate_user_name_message(&account.user_name));
        }
        AppError::ValidationError(messages)
    }
}

fn to_bson_value<T: Serialize>(value: &T) -> AppResult<Bson> {
    to_bson(value).map_err(|e| AppError::DatabaseError(format!("BSON 변환 실패: {}", e)))
}

/// 변경된 필드만 담은 `$set` 문서. `updated_at`은 항상 포함됩니다.
fn set_document(changes: &AccountChanges) -> AppResult<Document> {
    let mut set = Document::new();

    if let Some(password_hash) = &changes.password_hash {
        set.insert("password_hash", password_hash.as_str());
    }
    if let Some(security_stamp) = &changes.security_stamp {
        set.insert("security_stamp", security_stamp.as_str());
    }
    if let Some(count) = &changes.access_failed_count {
        set.insert("access_failed_count", to_bson_value(count)?);
    }
    if let Some(lockout_end) = &changes.lockout_end {
        set.insert("lockout_end", to_bson_value(lockout_end)?);
    }
    if let Some(refresh_token) = &changes.refresh_token {
        set.insert("refresh_token", to_bson_value(refresh_token)?);
    }
    if let Some(email_confirmed) = changes.email_confirmed {
        set.insert("email_confirmed", email_confirmed);
    }
    if let Some(token) = &changes.email_confirmation_token {
        set.insert("email_confirmation_token", to_bson_value(token)?);
    }
    if let Some(path) = &changes.profile_image_path {
        set.insert("profile_image_path", to_bson_value(path)?);
    }

    set.insert("updated_at", to_bson_value(&Utc::now())?);
    Ok(set)
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl AccountRepository for MongoAccountRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>> {
        self.accounts
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_normalized_user_name(&self, normalized_user_name: &str) -> AppResult<Option<Account>> {
        self.accounts
            .find_one(doc! { "normalized_user_name": normalized_user_name })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_normalized_email(&self, normalized_email: &str) -> AppResult<Option<Account>> {
        self.accounts
            .find_one(doc! { "normalized_email": normalized_email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, account: &Account) -> AppResult<()> {
        match self.accounts.insert_one(account).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(self.duplicate_error(account).await),
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    async fn update_fields(&self, id: &str, changes: &AccountChanges) -> AppResult<()> {
        let result = self
            .accounts
            .update_one(doc! { "_id": id }, doc! { "$set": set_document(changes)? })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::not_found("Account not found"));
        }
        Ok(())
    }

    async fn increment_access_failed_count(&self, id: &str) -> AppResult<u32> {
        let updated = self
            .accounts
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$inc": { "access_failed_count": 1 },
                    "$set": { "updated_at": to_bson_value(&Utc::now())? },
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        updated
            .map(|account| account.access_failed_count)
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn find_role_by_normalized_name(&self, normalized_name: &str) -> AppResult<Option<Role>> {
        self.roles
            .find_one(doc! { "normalized_name": normalized_name })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert_role(&self, role: &Role) -> AppResult<()> {
        match self.roles.insert_one(role).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(AppError::validation(format!(
                "Role name '{}' is already taken.",
                role.name
            ))),
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    async fn add_to_role(&self, user_id: &str, role_id: &str) -> AppResult<()> {
        let assignment = UserRole {
            user_id: user_id.to_string(),
            role_id: role_id.to_string(),
        };

        match self.user_roles.insert_one(&assignment).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Ok(()),
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    async fn roles_of(&self, user_id: &str) -> AppResult<Vec<String>> {
        let assignments: Vec<UserRole> = self
            .user_roles
            .find(doc! { "user_id": user_id })
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let role_ids: Vec<&str> = assignments.iter().map(|a| a.role_id.as_str()).collect();
        let roles: Vec<Role> = self
            .roles
            .find(doc! { "_id": { "$in": role_ids } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(assignments
            .iter()
            .filter_map(|assignment| roles.iter().find(|role| role.id == assignment.role_id))
            .map(|role| role.name.clone())
            .collect())
    }
}
