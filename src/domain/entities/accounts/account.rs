//! Account Entity Implementation
//!
//! 등록된 사용자를 표현하는 계정 엔티티입니다.
//! 비밀번호는 bcrypt 해시로만 보관하며, 세션 관련 필드(보안 스탬프, 리프레시 토큰)는
//! 로그인/갱신/로그아웃/비밀번호 변경 시에만 변경됩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 계정에 저장된 리프레시 토큰과 만료 시각
///
/// 토큰과 만료 시각은 하나의 값으로 묶여 있어 항상 함께 설정되거나 함께 비워집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRefreshToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredRefreshToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// 사용자 계정 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// 불투명 식별자 (UUID v4 문자열)
    #[serde(rename = "_id")]
    pub id: String,
    pub user_name: String,
    /// 대소문자 구분 없는 조회/유일성 검사용 키
    pub normalized_user_name: String,
    pub email: String,
    pub normalized_email: String,
    #[serde(default)]
    pub email_confirmed: bool,
    /// 이메일 확인 대기 중인 토큰
    #[serde(default)]
    pub email_confirmation_token: Option<String>,
    pub password_hash: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    /// 스토리지 내 프로필 이미지 경로
    #[serde(default)]
    pub profile_image_path: Option<String>,
    /// 자격 증명/역할 변경 시마다 교체되는 버전 마커
    pub security_stamp: String,
    #[serde(default)]
    pub access_failed_count: u32,
    #[serde(default)]
    pub lockout_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub refresh_token: Option<StoredRefreshToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// 새 계정을 생성합니다. 비밀번호 해시는 자격 증명 저장소가 채웁니다.
    pub fn new(first_name: String, last_name: Option<String>, email: String, user_name: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            normalized_user_name: normalize_key(&user_name),
            user_name,
            normalized_email: normalize_key(&email),
            email,
            email_confirmed: false,
            email_confirmation_token: None,
            password_hash: String::new(),
            first_name,
            last_name,
            profile_image_path: None,
            security_stamp: new_security_stamp(),
            access_failed_count: 0,
            lockout_end: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 잠금 해제 시각이 `now` 이후이면 잠긴 상태입니다.
    pub fn is_locked_out_at(&self, now: DateTime<Utc>) -> bool {
        self.lockout_end.is_some_and(|end| end > now)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// 사용자 이름/이메일/역할 이름의 정규화 키
pub fn normalize_key(value: &str) -> String {
    value.trim().to_uppercase()
}

/// 새 보안 스탬프 생성
pub fn new_security_stamp() -> String {
    Uuid::new_v4().simple().to_string().to_uppercase()
}
