//! 인증 및 세션 서비스 모듈
//!
//! 액세스 토큰 발급/검증, 요청별 세션 생존 검사, 토큰 전달 방식(세션 제공자)을 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenCodec, SessionGate};
//!
//! let claims = codec.validate_access_token(&token, true)?;
//! if gate.check(&claims).await.is_allowed() {
//!     // 요청 처리
//! }
//! ```

pub mod session_gate;
pub mod session_provider;
pub mod token_codec;

pub use session_gate::{DenyReason, GateDecision, SessionGate};
pub use session_provider::{BearerSessionProvider, CookieSessionProvider, SessionProvider, SessionProviders};
pub use token_codec::{extract_bearer_token, refresh_tokens_match, TokenCodec, REFRESH_TOKEN_BYTES};
