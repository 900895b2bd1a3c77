use serde::{Deserialize, Serialize};

use crate::domain::entities::Account;

/// 현재 사용자(`GET /api/me`) 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub user_name: String,
}

impl From<&Account> for UserResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            user_name: account.user_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_from_account() {
        let account = Account::new(
            "Jane".to_string(),
            Some("Doe".to_string()),
            "jane@x.com".to_string(),
            "jane".to_string(),
        );
        let json = serde_json::to_value(UserResponse::from(&account)).unwrap();

        assert_eq!(json["id"], account.id.as_str());
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["lastName"], "Doe");
        assert_eq!(json["email"], "jane@x.com");
        assert_eq!(json["userName"], "jane");
        assert!(json.get("passwordHash").is_none());
    }
}
