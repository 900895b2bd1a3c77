//! 애플리케이션 공유 상태
//!
//! `main`에서 한 번 조립되어 `web::Data<AppState>`로 핸들러와 인증 미들웨어에 전달됩니다.

use std::sync::Arc;

use crate::email::EmailSender;
use crate::services::auth::{SessionGate, SessionProviders, TokenCodec};
use crate::services::identity::{AuthenticatedService, CredentialStore, IdentityService};
use crate::storage::StorageProvider;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub authenticated: Arc<AuthenticatedService>,
    pub gate: Arc<SessionGate>,
    pub codec: Arc<TokenCodec>,
    pub sessions: Arc<SessionProviders>,
}

impl AppState {
    pub fn new(
        store: Arc<CredentialStore>,
        codec: Arc<TokenCodec>,
        storage: Arc<dyn StorageProvider>,
        email_sender: Arc<dyn EmailSender>,
        sessions: SessionProviders,
    ) -> Self {
        Self {
            identity: Arc::new(IdentityService::new(store.clone(), codec.clone(), email_sender)),
            authenticated: Arc::new(AuthenticatedService::new(store.clone(), storage)),
            gate: Arc::new(SessionGate::new(store)),
            codec,
            sessions: Arc::new(sessions),
        }
    }
}
