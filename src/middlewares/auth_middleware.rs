//! 세션 인증 미들웨어
//!
//! 스코프에 등록되면 모든 요청에 대해 다음을 수행합니다.
//!
//! 1. 등록된 세션 제공자(Bearer 헤더, 쿠키)에서 액세스 토큰을 찾습니다.
//! 2. 토큰 코덱으로 서명, 발급자, 대상, 만료를 검증합니다.
//! 3. 세션 생존 검사로 계정 존재, 잠금 상태, 보안 스탬프 일치를 확인합니다.
//! 4. 필요한 역할이 지정되어 있으면 토큰의 역할 클레임과 비교합니다.
//!
//! 통과한 요청 주체는 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)로
//! Request Extensions에 저장됩니다. 비밀번호 변경이나 관리자 잠금으로 보안 스탬프가 바뀐 계정의
//! 토큰은 만료 전이라도 여기서 401로 거부됩니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 세션 인증 미들웨어
pub struct AuthMiddleware {
    /// 접근에 필요한 역할. `None`이면 살아 있는 세션만 요구합니다.
    required_role: Option<String>,
}

impl AuthMiddleware {
    /// 살아 있는 세션이 필요한 스코프
    pub fn required() -> Self {
        Self { required_role: None }
    }

    /// 살아 있는 세션과 특정 역할이 필요한 스코프 (역할 이름은 대소문자 구분)
    pub fn required_with_role(role: &str) -> Self {
        Self {
            required_role: Some(role.to_string()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::{AUTHORIZATION, COOKIE};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use serde_json::Value;

    use super::*;
    use crate::domain::dto::{LoginRequest, RegisterRequest};
    use crate::domain::entities::{ADMINISTRATOR, USER};
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::state::tests::test_state;
    use crate::state::AppState;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_name)
    }

    async fn login_as_jane(state: &AppState) -> String {
        state
            .identity
            .register(&RegisterRequest {
                first_name: "Jane".to_string(),
                last_name: None,
                email: "jane@x.com".to_string(),
                user_name: "jane".to_string(),
                password: "Passw0rd!".to_string(),
            })
            .await
            .unwrap();
        login(state).await
    }

    async fn login(state: &AppState) -> String {
        state
            .identity
            .login(&LoginRequest {
                user_name: "jane".to_string(),
                password: "Passw0rd!".to_string(),
            })
            .await
            .unwrap()
            .access_token
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .service(
                        web::scope("/protected")
                            .wrap(AuthMiddleware::required())
                            .route("/whoami", web::get().to(whoami)),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(AuthMiddleware::required_with_role(ADMINISTRATOR))
                            .route("/whoami", web::get().to(whoami)),
                    )
                    .service(
                        web::scope("/members")
                            .wrap(AuthMiddleware::required_with_role(USER))
                            .route("/whoami", web::get().to(whoami)),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _) = test_state(dir.path()).await;
        let app = app!(state);

        let req = test::TestRequest::get().uri("/protected/whoami").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 401);
        assert_eq!(body["errors"][0], "Authentication is required");
    }

    #[actix_web::test]
    async fn test_bearer_and_cookie_tokens_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _) = test_state(dir.path()).await;
        let token = login_as_jane(&state).await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/protected/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "jane");

        let req = test::TestRequest::get()
            .uri("/protected/whoami")
            .insert_header((COOKIE, format!("access_token={}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_stale_session_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _) = test_state(dir.path()).await;
        let first = login_as_jane(&state).await;
        let _second = login(&state).await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/protected/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {}", first)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_locked_out_account_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (state, store) = test_state(dir.path()).await;
        let token = login_as_jane(&state).await;

        let mut account = store.find_by_user_name("jane").await.unwrap().unwrap();
        store
            .lock_out_until(&mut account, chrono::Utc::now() + chrono::Duration::minutes(10))
            .await
            .unwrap();
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/protected/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_role_requirements() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _) = test_state(dir.path()).await;
        let token = login_as_jane(&state).await;
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/admin/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/members/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
