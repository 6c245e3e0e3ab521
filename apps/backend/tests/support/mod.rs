//! Shared test plumbing: state and app builders, registration helper.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::infra::state::build_state;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::AppError;
use db_infra::{DbKind, RuntimeEnv};

#[allow(dead_code)]
pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// Build an AppState backed by a fresh, fully-migrated in-memory SQLite
/// database and the shared test signing secret.
#[allow(dead_code)]
pub async fn build_sqlite_state() -> Result<AppState, AppError> {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_security(SecurityConfig::new(TEST_SECRET.as_bytes()))
        .build()
        .await
}

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for creating test Actix service instances
pub struct TestAppBuilder {
    state: AppState,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Configure the app with the production route set
    #[allow(dead_code)]
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure) as RouteConfigFn);
        self
    }

    /// Configure the app with custom routes
    #[allow(dead_code)]
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    /// Build the test service
    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        let state = self.state;
        let route_config = self.route_config;

        let data = web::Data::new(state);

        let service = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        Ok(service)
    }
}

/// Create a new test app builder with the given AppState
pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}

/// Register a user through the real endpoint and return (user, token).
#[allow(dead_code)]
pub async fn register_user<S>(
    app: &S,
    name: &str,
    email: &str,
    password: &str,
    role: Option<&str>,
) -> (serde_json::Value, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let mut payload = serde_json::json!({
        "name": name,
        "email": email,
        "password": password,
    });
    if let Some(role) = role {
        payload["role"] = serde_json::json!(role);
    }

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "registration should succeed");

    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["data"]["token"]
        .as_str()
        .expect("registration returns a token")
        .to_string();
    (body["data"]["user"].clone(), token)
}
