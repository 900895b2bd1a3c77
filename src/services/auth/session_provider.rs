//! 세션 제공자
//!
//! 액세스 토큰이 요청에 실려 오는 방식을 추상화합니다.
//! 요청 인증 시 등록 순서대로 토큰을 찾고, 로그인/로그아웃 시에는 모든 제공자에게
//! 세션 설정/삭제 기회를 줍니다.
//!
//! | 제공자 | 토큰 위치 | 로그인 시 | 로그아웃 시 |
//! |--------|-----------|-----------|-------------|
//! | [`BearerSessionProvider`] | `Authorization: Bearer <token>` | - | - |
//! | [`CookieSessionProvider`] | HttpOnly 쿠키 | 쿠키 설정 | 쿠키 만료 |

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header::{HeaderMap, AUTHORIZATION, COOKIE};
use actix_web::HttpResponseBuilder;

use crate::domain::models::token::AuthResponse;
use crate::services::auth::token_codec::extract_bearer_token;

pub trait SessionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// 요청 헤더에서 액세스 토큰을 찾습니다.
    fn extract_token(&self, headers: &HeaderMap) -> Option<String>;

    fn sign_in(&self, response: &mut HttpResponseBuilder, tokens: &AuthResponse);

    fn sign_out(&self, response: &mut HttpResponseBuilder);
}

/// `Authorization` 헤더 기반 세션 (API 클라이언트용)
#[derive(Debug, Default, Clone)]
pub struct BearerSessionProvider;

impl SessionProvider for BearerSessionProvider {
    fn name(&self) -> &'static str {
        "bearer"
    }

    fn extract_token(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .map(str::to_string)
    }

    fn sign_in(&self, _response: &mut HttpResponseBuilder, _tokens: &AuthResponse) {}

    fn sign_out(&self, _response: &mut HttpResponseBuilder) {}
}

/// HttpOnly 쿠키 기반 세션 (웹 페이지용)
#[derive(Debug, Clone)]
pub struct CookieSessionProvider {
    cookie_name: String,
    secure: bool,
    max_age: chrono::Duration,
}

impl CookieSessionProvider {
    pub fn new(cookie_name: impl Into<String>, secure: bool, max_age: chrono::Duration) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            secure,
            max_age,
        }
    }
}

impl SessionProvider for CookieSessionProvider {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn extract_token(&self, headers: &HeaderMap) -> Option<String> {
        let cookie_str = headers.get(COOKIE)?.to_str().ok()?;

        for cookie_pair in cookie_str.split(';') {
            let cookie_pair = cookie_pair.trim();
            if let Some((name, value)) = cookie_pair.split_once('=') {
                if name == self.cookie_name && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
        None
    }

    fn sign_in(&self, response: &mut HttpResponseBuilder, tokens: &AuthResponse) {
        let cookie = Cookie::build(self.cookie_name.clone(), tokens.access_token.clone())
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(CookieDuration::seconds(self.max_age.num_seconds()))
            .finish();
        response.cookie(cookie);
    }

    fn sign_out(&self, response: &mut HttpResponseBuilder) {
        let mut cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .finish();
        cookie.make_removal();
        response.cookie(cookie);
    }
}

/// 등록된 세션 제공자 목록
#[derive(Default)]
pub struct SessionProviders {
    providers: Vec<Box<dyn SessionProvider>>,
}

impl SessionProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl SessionProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// 등록 순서대로 첫 번째로 발견된 토큰
    pub fn extract_token(&self, headers: &HeaderMap) -> Option<String> {
        self.providers
            .iter()
            .find_map(|provider| provider.extract_token(headers))
    }

    pub fn sign_in_all(&self, response: &mut HttpResponseBuilder, tokens: &AuthResponse) {
        for provider in &self.providers {
            provider.sign_in(response, tokens);
        }
    }

    pub fn sign_out_all(&self, response: &mut HttpResponseBuilder) {
        for provider in &self.providers {
            provider.sign_out(response);
        }
    }
}
