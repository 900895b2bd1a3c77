//! 신원 서비스
//!
//! 로그인, 회원가입, 로그아웃, 토큰 갱신을 조율합니다.
//! 자격 증명 저장소의 변경(보안 스탬프, 리프레시 토큰)은 토큰을 반환하기 전에 모두 저장됩니다.
//!
//! # 실패 메시지
//!
//! | 흐름 | 에러 | 메시지 |
//! |------|------|--------|
//! | 로그인 | `AuthenticationError` | `Invalid username or password` (계정 없음/잠김/비밀번호 불일치 공통) |
//! | 갱신 (액세스 토큰 검증 실패) | `AuthenticationError` | `Invalid access token signature`, `Couldn't verify the access token` |
//! | 갱신 (리프레시 토큰 불일치/만료/없음) | `AuthenticationError` | `Invalid refresh token` |
//! | 회원가입 | `ValidationError` | `Registration failed` + 상세 메시지 |

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::{ChangePasswordRequest, ConfirmEmailRequest, LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::domain::entities::{Account, USER};
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::{AuthResponse, ClaimSet};
use crate::email::EmailSender;
use crate::services::auth::{refresh_tokens_match, TokenCodec};
use crate::services::identity::CredentialStore;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const INVALID_ACCESS_TOKEN: [&str; 2] = ["Invalid access token signature", "Couldn't verify the access token"];
pub const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";
pub const REGISTRATION_FAILED: &str = "Registration failed";

const VERIFICATION_SUBJECT: &str = "Verify your email address";

pub struct IdentityService {
    store: Arc<CredentialStore>,
    codec: Arc<TokenCodec>,
    email_sender: Arc<dyn EmailSender>,
}

impl IdentityService {
    pub fn new(store: Arc<CredentialStore>, codec: Arc<TokenCodec>, email_sender: Arc<dyn EmailSender>) -> Self {
        Self {
            store,
            codec,
            email_sender,
        }
    }

    /// 사용자 이름과 비밀번호로 로그인합니다.
    ///
    /// 성공 시 보안 스탬프를 교체하므로 이전에 발급된 액세스 토큰은 모두 무효가 됩니다.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse> {
        let Some(mut account) = self.store.find_by_user_name(&request.user_name).await? else {
            self.store.verify_password_for_missing_account(&request.password);
            log::warn!("로그인 실패: 존재하지 않는 사용자 {}", request.user_name);
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if self.store.is_locked_out(&account) {
            log::warn!("로그인 실패: 잠긴 계정 {}", account.user_name);
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if !self.store.verify_password(&account, &request.password) {
            self.store.record_failed_access(&mut account).await?;
            log::warn!("로그인 실패: 비밀번호 불일치 {}", account.user_name);
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        self.store.reset_access_failed_count(&mut account).await?;
        self.store.update_security_stamp(&mut account).await?;

        let roles = self.store.roles_of(&account).await?;
        let claims = ClaimSet::for_account(&account, &roles);

        let response = self.issue_tokens(&mut account, &claims).await?;
        log::info!("로그인 성공: {} ({})", account.user_name, account.id);
        Ok(response)
    }

    /// 만료된 액세스 토큰과 리프레시 토큰을 새 토큰 쌍으로 교환합니다.
    ///
    /// 새 액세스 토큰은 제출된 토큰의 클레임을 그대로 사용합니다.
    /// 발급 이후 역할이 바뀌었다면 갱신된 토큰에는 이전 역할이 남습니다.
    pub async fn refresh_token(&self, request: &RefreshTokenRequest) -> AppResult<AuthResponse> {
        let claims = self
            .codec
            .validate_access_token(&request.access_token, false)
            .filter(|claims| claims.subject().is_some())
            .ok_or_else(|| {
                log::warn!("토큰 갱신 실패: 액세스 토큰 검증 실패");
                AppError::AuthenticationError(INVALID_ACCESS_TOKEN.iter().map(|m| m.to_string()).collect())
            })?;

        let subject = claims.subject().unwrap_or_default();
        let Some(mut account) = self.store.find_by_id(subject).await? else {
            log::warn!("토큰 갱신 실패: 계정 없음 {}", subject);
            return Err(AppError::authentication(INVALID_REFRESH_TOKEN));
        };

        let now = Utc::now();
        let valid = account.refresh_token.as_ref().is_some_and(|stored| {
            !stored.is_expired_at(now) && refresh_tokens_match(&stored.token, &request.refresh_token)
        });
        if !valid {
            log::warn!("토큰 갱신 실패: 리프레시 토큰 불일치 또는 만료 {}", account.user_name);
            return Err(AppError::authentication(INVALID_REFRESH_TOKEN));
        }

        let response = self.issue_tokens(&mut account, &claims).await?;
        log::info!("토큰 갱신 성공: {}", account.user_name);
        Ok(response)
    }

    /// 새 계정을 등록하고 기본 역할을 할당한 뒤 이메일 확인 토큰을 발송합니다.
    ///
    /// 이메일 발송이 실패해도 계정은 유지되며, 실패 메시지는 `Registration failed`와 함께 반환됩니다.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<()> {
        let account = Account::new(
            request.first_name.clone(),
            request.last_name.clone(),
            request.email.clone(),
            request.user_name.clone(),
        );

        let mut account = match self.store.create(account, &request.password).await {
            Ok(account) => account,
            Err(AppError::ValidationError(messages)) => {
                log::warn!("회원가입 실패: {} ({})", request.user_name, messages.join(", "));
                return Err(registration_failed(messages));
            }
            Err(e) => return Err(e),
        };

        self.store.assign_role(&mut account, USER).await?;

        let token = self.store.generate_email_confirmation_token(&mut account).await?;
        let body = format!("Your email verification token:\n{}", token);

        if let Err(e) = self.email_sender.send(&account.email, VERIFICATION_SUBJECT, &body).await {
            log::error!("확인 이메일 발송 실패: {} ({})", account.email, e);
            return Err(registration_failed(e.0));
        }

        log::info!("회원가입 완료: {} ({})", account.user_name, account.id);
        Ok(())
    }

    /// 리프레시 토큰을 삭제합니다. 이미 발급된 액세스 토큰은 만료 시까지 유효합니다.
    pub async fn logout(&self, user: &AuthenticatedUser) -> AppResult<()> {
        let mut account = self
            .store
            .find_by_id(&user.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.store.clear_refresh_token(&mut account).await?;
        log::info!("로그아웃: {}", account.user_name);
        Ok(())
    }

    /// 비밀번호를 변경합니다. 모든 기존 세션이 종료됩니다.
    pub async fn change_password(&self, user: &AuthenticatedUser, request: &ChangePasswordRequest) -> AppResult<()> {
        let mut account = self
            .store
            .find_by_id(&user.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.store
            .change_password(&mut account, &request.current_password, &request.new_password)
            .await?;
        log::info!("비밀번호 변경: {}", account.user_name);
        Ok(())
    }

    pub async fn confirm_email(&self, request: &ConfirmEmailRequest) -> AppResult<()> {
        let Some(mut account) = self.store.find_by_user_name(&request.user_name).await? else {
            return Err(AppError::validation("Invalid token."));
        };

        self.store.confirm_email(&mut account, &request.token).await?;
        log::info!("이메일 확인 완료: {}", account.user_name);
        Ok(())
    }

    /// 관리자 잠금 설정. `minutes = 0`이면 잠금을 해제합니다.
    ///
    /// 보안 스탬프가 교체되므로 대상 계정의 기존 세션은 즉시 거부됩니다.
    pub async fn set_lockout(&self, user_name: &str, minutes: i64) -> AppResult<()> {
        let mut account = self
            .store
            .find_by_user_name(user_name)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let until = (minutes > 0).then(|| Utc::now() + Duration::minutes(minutes));
        self.store.set_lockout_end(&mut account, until).await?;

        match until {
            Some(until) => log::warn!("🔒 관리자 계정 잠금: {} (until {})", account.user_name, until),
            None => log::info!("🔓 관리자 계정 잠금 해제: {}", account.user_name),
        }
        Ok(())
    }

    async fn issue_tokens(&self, account: &mut Account, claims: &ClaimSet) -> AppResult<AuthResponse> {
        let access_token = self.codec.issue_access_token(claims)?;
        let refresh_token = TokenCodec::generate_refresh_token();
        let expires_at = Utc::now() + self.codec.settings().refresh_token_ttl;

        self.store
            .set_refresh_token(account, refresh_token.clone(), expires_at)
            .await?;

        Ok(AuthResponse::new(access_token, refresh_token))
    }
}

fn registration_failed(details: Vec<String>) -> AppError {
    let mut messages = vec![REGISTRATION_FAILED.to_string()];
    messages.extend(details);
    AppError::ValidationError(messages)
}
