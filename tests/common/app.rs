//! Test application construction

use axum_test::TestServer;
use notekeep::backend::routes::create_router;
use notekeep::backend::server::AppState;
use notekeep::shared::AppConfig;

/// Configuration for tests: cheap bcrypt, fixed secret
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret("integration-test-secret")
        .bcrypt_cost(4)
        .build()
        .expect("test configuration is valid")
}

/// Full router on in-memory stores
pub fn test_server() -> TestServer {
    let app = create_router(AppState::in_memory(test_config()));
    TestServer::new(app).unwrap()
}
