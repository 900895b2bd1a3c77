//! Role Entity Implementation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::normalize_key;

pub const ADMINISTRATOR: &str = "Administrator";
pub const POWER_USER: &str = "PowerUser";
pub const USER: &str = "User";

/// 시작 시 생성되는 기본 역할 목록
pub const DEFAULT_ROLES: [&str; 3] = [ADMINISTRATOR, POWER_USER, USER];

/// 이름이 있는 권한 그룹
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub normalized_name: String,
}

impl Role {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            normalized_name: normalize_key(name),
        }
    }
}

/// 계정-역할 할당 (두 참조 모두 필수)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: String,
    pub role_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_normalized_name() {
        let role = Role::new(POWER_USER);
        assert_eq!(role.name, "PowerUser");
        assert_eq!(role.normalized_name, "POWERUSER");
    }
}
