//! 세션 생존 검사
//!
//! 서명이 유효한 액세스 토큰이라도 아래 조건을 모두 만족해야 요청이 통과합니다.
//!
//! 1. 토큰의 `unique_name`으로 계정을 찾을 수 있음
//! 2. 계정이 잠겨 있지 않음
//! 3. 토큰의 `security_stamp`가 계정의 현재 보안 스탬프와 일치함
//!
//! 계정 저장소 조회가 실패하면 요청을 거부합니다.

use std::fmt;
use std::sync::Arc;

use crate::domain::entities::Account;
use crate::domain::models::token::ClaimSet;
use crate::services::identity::CredentialStore;

/// 거부 사유 (로그 전용, 응답에는 노출하지 않음)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    MissingClaims,
    AccountMissing,
    LockedOut,
    StampMismatch,
    StoreUnavailable,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DenyReason::MissingClaims => "missing user name or security stamp claim",
            DenyReason::AccountMissing => "account not found",
            DenyReason::LockedOut => "account locked out",
            DenyReason::StampMismatch => "security stamp mismatch",
            DenyReason::StoreUnavailable => "account store unavailable",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Allow(Account),
    Deny(DenyReason),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow(_))
    }
}

pub struct SessionGate {
    store: Arc<CredentialStore>,
}

impl SessionGate {
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self { store }
    }

    /// 검증된 클레임이 아직 살아 있는 세션을 나타내는지 판정합니다.
    pub async fn check(&self, claims: &ClaimSet) -> GateDecision {
        let decision = self.evaluate(claims).await;
        if let GateDecision::Deny(reason) = &decision {
            log::debug!(
                "세션 거부: {} (user_name={:?})",
                reason,
                claims.user_name()
            );
        }
        decision
    }

    async fn evaluate(&self, claims: &ClaimSet) -> GateDecision {
        let (Some(user_name), Some(stamp)) = (claims.user_name(), claims.security_stamp()) else {
            return GateDecision::Deny(DenyReason::MissingClaims);
        };

        let account = match self.store.find_by_user_name(user_name).await {
            Ok(Some(account)) => account,
            Ok(None) => return GateDecision::Deny(DenyReason::AccountMissing),
            Err(e) => {
                log::error!("세션 검사 중 계정 조회 실패: {}", e);
                return GateDecision::Deny(DenyReason::StoreUnavailable);
            }
        };

        if self.store.is_locked_out(&account) {
            return GateDecision::Deny(DenyReason::LockedOut);
        }
        if account.security_stamp != stamp {
            return GateDecision::Deny(DenyReason::StampMismatch);
        }

        GateDecision::Allow(account)
    }
}
