//! Authentication HTTP Handlers
//!
//! 로그인, 토큰 갱신, 회원가입, 이메일 확인, 로그아웃 엔드포인트를 처리합니다.
//! 로그인/갱신 성공 시 등록된 세션 제공자가 응답에 세션을 설정하고(쿠키 등),
//! 로그아웃 시 세션을 삭제합니다.
//!
//! # Endpoints
//!
//! - `POST /api/auth/login` - 사용자 이름/비밀번호 로그인
//! - `POST /api/auth/refresh` - 만료된 액세스 토큰 + 리프레시 토큰 교환
//! - `POST /api/auth/register` - 회원가입 (본문 없는 200)
//! - `POST /api/auth/confirm-email` - 이메일 확인 토큰 제출
//! - `POST /api/auth/logout` - 로그아웃 (인증 필요)
use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::{ConfirmEmailRequest, LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::state::AppState;

/// 로그인 핸들러
///
/// # Endpoint
/// `POST /api/auth/login`
///
/// 성공 시 `{ "accessToken": "...", "refreshToken": "..." }`.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = state.identity.login(&payload).await?;

    let mut response = HttpResponse::Ok();
    state.sessions.sign_in_all(&mut response, &tokens);
    Ok(response.json(tokens))
}

/// 토큰 갱신 핸들러
///
/// # Endpoint
/// `POST /api/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    state: web::Data<AppState>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = state.identity.refresh_token(&payload).await?;

    let mut response = HttpResponse::Ok();
    state.sessions.sign_in_all(&mut response, &tokens);
    Ok(response.json(tokens))
}

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/auth/register`
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.identity.register(&payload).await?;
    Ok(HttpResponse::Ok().finish())
}

#[post("/confirm-email")]
pub async fn confirm_email(
    state: web::Data<AppState>,
    payload: web::Json<ConfirmEmailRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.identity.confirm_email(&payload).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 로그아웃 핸들러
///
/// 리프레시 토큰을 삭제하고 세션 제공자의 세션(쿠키)을 만료시킵니다.
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout", wrap = "AuthMiddleware::required()")]
pub async fn logout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.identity.logout(&user).await?;

    let mut response = HttpResponse::NoContent();
    state.sessions.sign_out_all(&mut response);
    Ok(response.finish())
}
