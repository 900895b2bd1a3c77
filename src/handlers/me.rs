//! 현재 사용자 HTTP Handlers
//!
//! `/api/me` 스코프는 인증 미들웨어 아래에 등록되므로 모든 핸들러가
//! 세션 생존 검사를 통과한 [`AuthenticatedUser`]를 받습니다.
use actix_web::http::header::ContentType;
use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::ChangePasswordRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::state::AppState;

/// 현재 사용자 프로필 조회
///
/// # Endpoint
/// `GET /api/me`
#[get("")]
pub async fn get_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let me = state.authenticated.get_me(&user).await?;
    Ok(HttpResponse::Ok().json(me))
}

/// 비밀번호 변경. 성공하면 모든 기존 세션이 종료됩니다.
///
/// # Endpoint
/// `POST /api/me/password`
#[post("/password")]
pub async fn change_password(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.identity.change_password(&user, &payload).await?;

    let mut response = HttpResponse::NoContent();
    state.sessions.sign_out_all(&mut response);
    Ok(response.finish())
}

/// 프로필 이미지 업로드 (요청 본문 전체가 이미지 바이트)
///
/// # Endpoint
/// `PUT /api/me/image`
#[put("/image")]
pub async fn upload_image(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    state.authenticated.upload_profile_image(&user, &body).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/image")]
pub async fn get_image(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let image = state.authenticated.read_profile_image(&user).await?;
    Ok(HttpResponse::Ok().content_type(ContentType::octet_stream()).body(image))
}

#[delete("/image")]
pub async fn delete_image(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.authenticated.delete_profile_image(&user).await?;
    Ok(HttpResponse::NoContent().finish())
}
