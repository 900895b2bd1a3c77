//! 신원 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! 계정 저장소(MongoDB 또는 메모리)를 연결하고, 기본 역할을 시딩한 뒤
//! JWT 세션 기반의 REST API를 제공합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use identity_service_backend::config::{
    DefaultAdminConfig, Environment, JwtConfig, LockoutConfig, PasswordConfig, RateLimitConfig,
    ServerConfig, SessionConfig, StorageConfig, StoreBackend,
};
use identity_service_backend::db::Database;
use identity_service_backend::email::LogEmailSender;
use identity_service_backend::repositories::accounts::{
    AccountRepository, InMemoryAccountRepository, MongoAccountRepository,
};
use identity_service_backend::routes::configure_all_routes;
use identity_service_backend::services::auth::{
    BearerSessionProvider, CookieSessionProvider, SessionProviders, TokenCodec,
};
use identity_service_backend::services::identity::{seed_identity, CredentialStore};
use identity_service_backend::state::AppState;
use identity_service_backend::storage::FileSystemStorageProvider;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 신원 서비스 시작중...");

    let state = initialize_state().await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(state).await
}

/// 계정 저장소, 토큰 코덱, 스토리지, 세션 제공자를 조립하고 신원 저장소를 시딩합니다.
async fn initialize_state() -> io::Result<AppState> {
    let repository = initialize_repository().await?;

    let store = Arc::new(CredentialStore::new(
        repository,
        PasswordConfig::bcrypt_cost(),
        LockoutConfig::policy(),
    ));

    let default_admin = DefaultAdminConfig::from_env();
    seed_identity(&store, default_admin.as_ref())
        .await
        .map_err(|e| io::Error::other(format!("신원 저장소 시딩 실패: {}", e)))?;

    let jwt_settings = JwtConfig::settings();
    let access_token_ttl = jwt_settings.access_token_ttl;
    let codec = Arc::new(TokenCodec::new(jwt_settings));

    let mut sessions = SessionProviders::new().with(BearerSessionProvider);
    if SessionConfig::cookie_enabled() {
        let secure = Environment::current() == Environment::Production;
        sessions = sessions.with(CookieSessionProvider::new(
            SessionConfig::cookie_name(),
            secure,
            access_token_ttl,
        ));
    }
    info!("🔑 세션 제공자: {:?}", sessions.names());

    let storage =
        FileSystemStorageProvider::new(StorageConfig::site_root(), StorageConfig::storage_folder());

    Ok(AppState::new(
        store,
        codec,
        Arc::new(storage),
        Arc::new(LogEmailSender),
        sessions,
    ))
}

/// 설정된 백엔드의 계정 저장소를 생성합니다
async fn initialize_repository() -> io::Result<Arc<dyn AccountRepository>> {
    match StoreBackend::current() {
        StoreBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");

            let database = Database::new().await.map_err(|e| {
                error!("데이터베이스 연결 실패: {}", e);
                io::Error::other(e.to_string())
            })?;

            let repository = MongoAccountRepository::new(&database);
            repository
                .create_indexes()
                .await
                .map_err(|e| io::Error::other(format!("인덱스 생성 실패: {}", e)))?;

            info!("✅ 계정 저장소 준비 완료 (MongoDB: {})", database.database_name());
            Ok(Arc::new(repository))
        }
        StoreBackend::Memory => {
            warn!("⚠️ 메모리 계정 저장소 사용 중 (재시작 시 데이터 소실)");
            Ok(Arc::new(InMemoryAccountRepository::new()))
        }
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, Rate Limiting, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: AppState) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api", bind_address);

    let rate_limit = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second, rate_limit.burst_size
    );

    let origins = ServerConfig::cors_allowed_origins();
    info!("🌍 CORS 허용 Origin: {:?}", origins);

    let state = web::Data::new(state);

    HttpServer::new(move || {
        let cors = configure_cors(&origins);

        App::new()
            .app_data(state.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 라우트 설정
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(4) // 워커 스레드 수
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// # 세션 거부 사유까지 확인
/// RUST_LOG=identity_service_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 설정된 Origin 목록으로 CORS를 구성합니다
///
/// 쿠키 세션을 위해 자격 증명을 허용합니다.
fn configure_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
