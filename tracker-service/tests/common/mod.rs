use std::sync::Arc;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use tracker_service::identity::service::AuthenticationService;
use tracker_service::inbound::http::router::create_router;
use tracker_service::inbound::http::router::AppState;
use tracker_service::project::service::ProjectService;
use tracker_service::repositories::InMemoryCredentialStore;
use tracker_service::repositories::InMemoryProjectRepository;

pub const ACCESS_SECRET: &str = "test_access_secret_at_least_32_bytes!";
pub const REFRESH_SECRET: &str = "test_refresh_secret_at_least_32_byte!";

/// Test application driving the router in-process over the in-memory stores.
pub struct TestApp {
    router: Router,
    pub codec: Arc<TokenCodec>,
    pub store: Arc<InMemoryCredentialStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_cookie_mode(false)
    }

    pub fn with_cookie_mode(cookie_mode: bool) -> Self {
        let codec =
            Arc::new(TokenCodec::new(ACCESS_SECRET, REFRESH_SECRET, 15, Some(24)).unwrap());
        let store = Arc::new(InMemoryCredentialStore::new());
        let projects = Arc::new(InMemoryProjectRepository::new());

        let state = AppState {
            auth_service: Arc::new(AuthenticationService::new(
                Arc::clone(&store),
                Arc::clone(&codec),
            )),
            project_service: Arc::new(ProjectService::new(projects)),
            token_codec: Arc::clone(&codec),
            cookie_mode,
        };

        Self {
            router: create_router(state),
            codec,
            store,
        }
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, None, None, Some(body))
            .await
    }

    pub async fn post_with_bearer(
        &self,
        path: &str,
        token: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(token), None, body)
            .await
    }

    pub async fn put_with_bearer(
        &self,
        path: &str,
        token: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(Method::PUT, path, Some(token), None, Some(body))
            .await
    }

    pub async fn get_with_bearer(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, Some(token), None, None)
            .await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None, None, None).await
    }

    pub async fn post_with_cookie(&self, path: &str, cookie: &str) -> (StatusCode, Value) {
        self.request(Method::POST, path, None, Some(cookie), None)
            .await
    }

    /// Send a request and return the raw response (headers included).
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router call failed")
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }
}
