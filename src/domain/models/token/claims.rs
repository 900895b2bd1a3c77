//! 액세스 토큰 클레임 모델
//!
//! 클레임은 타입이 지정된 `(ClaimType, value)` 쌍의 순서 있는 목록입니다.
//! 목록은 항상 아래 고정 순서를 유지하며, 같은 타입 안에서는 추가된 순서를 따릅니다.
//!
//! | 순서 | ClaimType | JWT 필드 | 값 |
//! |------|-----------|----------|-----|
//! | 1 | `NameIdentifier` | `sub` | 계정 ID |
//! | 2 | `GivenName` | `given_name` | 이름 |
//! | 3 | `Surname` | `family_name` | 성 (없으면 빈 문자열) |
//! | 4 | `Name` | `unique_name` | 사용자 이름 |
//! | 5 | `Email` | `email` | 이메일 |
//! | 6 | `SerialNumber` | `security_stamp` | 보안 스탬프 |
//! | 7.. | `Role` | `role` (배열) | 역할 이름 |

use serde_json::{Map, Value};

use crate::domain::entities::Account;

/// 클레임 타입 (선언 순서가 곧 정렬 순서)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClaimType {
    NameIdentifier,
    GivenName,
    Surname,
    Name,
    Email,
    SerialNumber,
    Role,
}

impl ClaimType {
    pub const ALL: [ClaimType; 7] = [
        ClaimType::NameIdentifier,
        ClaimType::GivenName,
        ClaimType::Surname,
        ClaimType::Name,
        ClaimType::Email,
        ClaimType::SerialNumber,
        ClaimType::Role,
    ];

    /// JWT 페이로드에서 사용하는 필드 이름
    pub fn jwt_name(&self) -> &'static str {
        match self {
            ClaimType::NameIdentifier => "sub",
            ClaimType::GivenName => "given_name",
            ClaimType::Surname => "family_name",
            ClaimType::Name => "unique_name",
            ClaimType::Email => "email",
            ClaimType::SerialNumber => "security_stamp",
            ClaimType::Role => "role",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub claim_type: ClaimType,
    pub value: String,
}

/// 고정 순서를 유지하는 클레임 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 계정과 역할 목록으로부터 표준 클레임 목록을 구성합니다.
    pub fn for_account(account: &Account, roles: &[String]) -> Self {
        let mut claims = Self::new();
        claims.push(ClaimType::NameIdentifier, &account.id);
        claims.push(ClaimType::GivenName, &account.first_name);
        claims.push(ClaimType::Surname, account.last_name.as_deref().unwrap_or(""));
        claims.push(ClaimType::Name, &account.user_name);
        claims.push(ClaimType::Email, &account.email);
        claims.push(ClaimType::SerialNumber, &account.security_stamp);
        for role in roles {
            claims.push(ClaimType::Role, role);
        }
        claims
    }

    /// 고정 순서를 유지하며 클레임을 추가합니다.
    pub fn push(&mut self, claim_type: ClaimType, value: impl Into<String>) {
        let position = self
            .claims
            .iter()
            .position(|claim| claim.claim_type > claim_type)
            .unwrap_or(self.claims.len());

        self.claims.insert(
            position,
            Claim {
                claim_type,
                value: value.into(),
            },
        );
    }

    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// 해당 타입의 첫 번째 값
    pub fn first(&self, claim_type: ClaimType) -> Option<&str> {
        self.claims
            .iter()
            .find(|claim| claim.claim_type == claim_type)
            .map(|claim| claim.value.as_str())
    }

    pub fn values(&self, claim_type: ClaimType) -> Vec<String> {
        self.claims
            .iter()
            .filter(|claim| claim.claim_type == claim_type)
            .map(|claim| claim.value.clone())
            .collect()
    }

    pub fn subject(&self) -> Option<&str> {
        self.first(ClaimType::NameIdentifier)
    }

    pub fn user_name(&self) -> Option<&str> {
        self.first(ClaimType::Name)
    }

    pub fn security_stamp(&self) -> Option<&str> {
        self.first(ClaimType::SerialNumber)
    }

    pub fn roles(&self) -> Vec<String> {
        self.values(ClaimType::Role)
    }

    /// JWT 페이로드용 JSON 필드로 변환합니다.
    ///
    /// 역할은 항상 배열로, 그 외 타입은 값이 하나면 문자열, 여럿이면 배열로 기록됩니다.
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();

        for claim_type in ClaimType::ALL {
            let values = self.values(claim_type);
            if values.is_empty() {
                continue;
            }

            let value = if values.len() == 1 && claim_type != ClaimType::Role {
                Value::String(values[0].clone())
            } else {
                Value::Array(values.into_iter().map(Value::String).collect())
            };
            map.insert(claim_type.jwt_name().to_string(), value);
        }

        map
    }

    /// JWT 페이로드 필드에서 클레임 목록을 복원합니다.
    ///
    /// 알 수 없는 필드(`iss`, `aud`, `exp` 등)와 문자열이 아닌 값은 무시합니다.
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        let mut claims = Self::new();

        for claim_type in ClaimType::ALL {
            match map.get(claim_type.jwt_name()) {
                Some(Value::String(value)) => claims.push(claim_type, value.as_str()),
                Some(Value::Array(values)) => {
                    for value in values.iter().filter_map(Value::as_str) {
                        claims.push(claim_type, value);
                    }
                }
                _ => {}
            }
        }

        claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            "Jane".to_string(),
            None,
            "jane@x.com".to_string(),
            "jane".to_string(),
        )
    }

    #[test]
    fn test_for_account_fixed_order() {
        let account = account();
        let claims = ClaimSet::for_account(&account, &["User".to_string(), "PowerUser".to_string()]);

        let types: Vec<ClaimType> = claims.iter().map(|c| c.claim_type).collect();
        assert_eq!(
            types,
            vec![
                ClaimType::NameIdentifier,
                ClaimType::GivenName,
                ClaimType::Surname,
                ClaimType::Name,
                ClaimType::Email,
                ClaimType::SerialNumber,
                ClaimType::Role,
                ClaimType::Role,
            ]
        );
        assert_eq!(claims.first(ClaimType::Surname), Some(""));
        assert_eq!(claims.subject(), Some(account.id.as_str()));
        assert_eq!(claims.security_stamp(), Some(account.security_stamp.as_str()));
        assert_eq!(claims.roles(), vec!["User", "PowerUser"]);
    }

    #[test]
    fn test_push_keeps_canonical_order() {
        let mut claims = ClaimSet::new();
        claims.push(ClaimType::Role, "Administrator");
        claims.push(ClaimType::Email, "a@b.c");
        claims.push(ClaimType::NameIdentifier, "42");
        claims.push(ClaimType::Role, "User");

        let pairs: Vec<(ClaimType, &str)> =
            claims.iter().map(|c| (c.claim_type, c.value.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                (ClaimType::NameIdentifier, "42"),
                (ClaimType::Email, "a@b.c"),
                (ClaimType::Role, "Administrator"),
                (ClaimType::Role, "User"),
            ]
        );
    }

    #[test]
    fn test_json_map_shapes() {
        let mut claims = ClaimSet::new();
        claims.push(ClaimType::NameIdentifier, "42");
        claims.push(ClaimType::Role, "User");

        let map = claims.to_json_map();
        assert_eq!(map["sub"], Value::String("42".to_string()));
        assert_eq!(map["role"], serde_json::json!(["User"]));
        assert!(!map.contains_key("email"));
    }

    #[test]
    fn test_from_json_map_ignores_unknown_fields() {
        let map = serde_json::json!({
            "sub": "42",
            "unique_name": "jane",
            "role": ["User", 7],
            "iss": "identity-service",
            "exp": 1700000000
        });
        let claims = ClaimSet::from_json_map(map.as_object().unwrap());

        assert_eq!(claims.len(), 3);
        assert_eq!(claims.user_name(), Some("jane"));
        assert_eq!(claims.roles(), vec!["User"]);
    }
}
