//! 이메일 발송 추상화
//!
//! 회원가입 시 이메일 확인 토큰을 전달하는 데 사용됩니다.
//! 실제 발송 채널(SMTP, 외부 API)은 [`EmailSender`] 구현으로 교체할 수 있으며,
//! 기본 구현인 [`LogEmailSender`]는 메시지를 로그로만 남깁니다.

use async_trait::async_trait;
use thiserror::Error;

/// 발송 실패 시 사용자에게 전달할 메시지 목록
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Email delivery failed: {}", .0.join(", "))]
pub struct EmailError(pub Vec<String>);

impl EmailError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

/// 메시지를 로그로 기록하고 항상 성공하는 발송기
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        log::info!("📧 이메일 발송: to={}, subject={}", to, subject);
        log::debug!("이메일 본문:\n{}", body);
        Ok(())
    }
}
