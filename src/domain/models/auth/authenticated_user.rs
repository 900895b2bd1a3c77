use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::domain::models::token::ClaimSet;

/// 세션 생존 검사를 통과한 요청 주체
///
/// 인증 미들웨어가 토큰 검증과 세션 생존 검사를 마친 뒤 Request Extensions에 저장합니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// 계정 ID (`sub` 클레임)
    pub user_id: String,

    /// 사용자 이름 (`unique_name` 클레임)
    pub user_name: String,

    /// 토큰에 담긴 역할 목록
    pub roles: Vec<String>,

    /// 검증된 전체 클레임
    pub claims: ClaimSet,
}

impl AuthenticatedUser {
    /// 검증된 클레임에서 요청 주체를 구성합니다. 주체 ID나 사용자 이름이 없으면 `None`.
    pub fn from_claims(claims: ClaimSet) -> Option<Self> {
        let user_id = claims.subject()?.to_string();
        let user_name = claims.user_name()?.to_string();
        let roles = claims.roles();

        Some(Self {
            user_id,
            user_name,
            roles,
            claims,
        })
    }

    /// 토큰 역할 클레임에 해당 역할이 있는지 확인 (대소문자 구분)
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|owned| owned == role)
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다",
            ))),
        }
    }
}
