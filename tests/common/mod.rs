#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    middleware::Logger,
    test, web, App, Error,
};
use serde_json::{json, Value};

use journi_api::config::{AppConfig, AuthSettings, Environment, StorageBackend};
use journi_api::db::{memory::MemoryUserStore, UserStore};
use journi_api::middleware::cors::build_cors;
use journi_api::routes;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub store: Arc<MemoryUserStore>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_environment(Environment::Development)
    }

    pub fn with_environment(environment: Environment) -> Self {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment,
            storage: StorageBackend::Memory,
            auth: AuthSettings {
                jwt_secret: TEST_SECRET.to_string(),
                token_ttl_secs: 3600,
                bcrypt_cost: 4,
            },
            cors_origins: vec!["http://localhost:3000".to_string()],
        };

        Self {
            store: Arc::new(MemoryUserStore::new()),
            config,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        let store: Arc<dyn UserStore> = self.store.clone();

        App::new()
            .wrap(build_cors(&self.config))
            .wrap(Logger::default())
            .app_data(web::Data::from(store))
            .app_data(web::Data::new(self.config.clone()))
            .configure(routes::configure)
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Identifiers serialize either as a bare hex string or as `{"$oid": "..."}`.
pub fn oid(value: &Value) -> String {
    match value {
        Value::String(hex) => hex.clone(),
        Value::Object(map) => map
            .get("$oid")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| panic!("not an object id: {}", value)),
        other => panic!("not an object id: {}", other),
    }
}

pub fn get_test_username() -> String {
    "traveller".to_string()
}

pub fn get_test_password() -> String {
    "testpassword123".to_string()
}

/// Registers `username` and returns the issued token.
pub async fn register<S, B>(app: &S, username: &str) -> String
where
    S: actix_web::dev::Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({
            "username": username,
            "password": get_test_password(),
            "firstName": "Test",
            "lastName": "User",
            "email": "test@example.com"
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "registration of {} failed", username);

    let body: Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("registration returns a token")
        .to_string()
}

/// Creates a trip and returns its id.
pub async fn create_trip<S, B>(app: &S, token: &str, name: &str) -> String
where
    S: actix_web::dev::Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/trips/add")
        .insert_header(bearer(token))
        .set_json(json!({
            "name": name,
            "startDate": "2024-05-01",
            "endDate": "2024-05-10"
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    oid(&body["_id"])
}
