//! 관리자 HTTP Handlers
//!
//! `Administrator` 역할이 필요한 `/api/admin` 스코프에 등록됩니다.
use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::LockoutRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::state::AppState;

/// 계정 잠금 설정/해제
///
/// `lockoutMinutes = 0`이면 잠금을 해제합니다. 대상 계정의 기존 세션은 즉시 거부됩니다.
///
/// # Endpoint
/// `POST /api/admin/users/{userName}/lockout`
#[post("/users/{user_name}/lockout")]
pub async fn set_lockout(
    state: web::Data<AppState>,
    admin: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<LockoutRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user_name = path.into_inner();
    log::info!(
        "관리자 {}의 잠금 요청: {} ({}분)",
        admin.user_name,
        user_name,
        payload.lockout_minutes
    );

    state.identity.set_lockout(&user_name, payload.lockout_minutes).await?;
    Ok(HttpResponse::NoContent().finish())
}
