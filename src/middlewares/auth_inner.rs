//! AuthMiddleware 요청 처리: 토큰 추출, 코덱 검증, 세션 생존 검사, 역할 확인
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::{AppError, ProblemDetails};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::GateDecision;
use crate::state::AppState;

pub const AUTHENTICATION_REQUIRED: &str = "Authentication is required";
pub const ACCESS_DENIED: &str = "Access denied";

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: Option<String>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let user = match authenticate_request(&req).await {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("인증 실패: {} ({})", err, req.path());
                    return Ok(reject(req, StatusCode::UNAUTHORIZED, AUTHENTICATION_REQUIRED));
                }
            };

            if let Some(role) = required_role.as_deref() {
                if !user.has_role(role) {
                    log::warn!(
                        "권한 부족: 사용자 {} ({:?}), 필요 권한: {}",
                        user.user_name,
                        user.roles,
                        role
                    );
                    return Ok(reject(req, StatusCode::FORBIDDEN, ACCESS_DENIED));
                }
            }

            log::debug!("인증 성공: 사용자 ID {}", user.user_id);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, status: StatusCode, message: &str) -> ServiceResponse<EitherBody<B>> {
    let response = ProblemDetails::new(status, vec![message.to_string()]).into_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 세션 제공자에서 토큰을 찾아 검증하고 세션 생존 검사를 수행합니다.
async fn authenticate_request(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("AppState가 등록되지 않았습니다".to_string()))?;

    let token = state
        .sessions
        .extract_token(req.headers())
        .ok_or_else(|| AppError::authentication("액세스 토큰이 없습니다"))?;

    let claims = state
        .codec
        .validate_access_token(&token, true)
        .ok_or_else(|| AppError::authentication("유효하지 않은 액세스 토큰입니다"))?;

    if let GateDecision::Deny(reason) = state.gate.check(&claims).await {
        return Err(AppError::authentication(format!("세션 거부: {}", reason)));
    }

    AuthenticatedUser::from_claims(claims)
        .ok_or_else(|| AppError::authentication("토큰에 사용자 클레임이 없습니다"))
}
