mod common;

use axum::http::header;
use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;
use serde_json::Value;

async fn register(app: &TestApp, login: &str, password: &str, role: u8) -> (StatusCode, Value) {
    app.post(
        "/api/v1/auth/register",
        json!({
            "login": login,
            "password": password,
            "confirm_password": password,
            "role": role,
        }),
    )
    .await
}

async fn login(app: &TestApp, login: &str, password: &str) -> (StatusCode, Value) {
    app.post(
        "/api/v1/auth/login",
        json!({ "login": login, "password": password }),
    )
    .await
}

#[tokio::test]
async fn test_register_login_user_info_scenario() {
    let app = TestApp::new();

    let (status, _) = register(&app, "alice", "secret123", 1).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(&app, "alice", "secret123").await;
    assert_eq!(status, StatusCode::OK);
    let access_token = body["access_token"].as_str().unwrap().to_string();
    assert!(body["refresh_token"].is_string());

    let (status, body) = app
        .get_with_bearer("/api/v1/auth/user-info", &access_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login"], "alice");
    assert_eq!(body["role"], 1);

    let (status, body) = app
        .get_with_bearer("/api/v1/auth/user-info", "garbage-token")
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthorized");
}

#[tokio::test]
async fn test_register_duplicate_login_conflict() {
    let app = TestApp::new();

    let (status, _) = register(&app, "alice", "secret123", 1).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(&app, "alice", "other456", 2).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/auth/register",
            json!({
                "login": "alice",
                "password": "secret123",
                "confirm_password": "secret124",
                "role": 1,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn test_register_unknown_role_rejected() {
    let app = TestApp::new();

    let (status, body) = register(&app, "alice", "secret123", 9).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn test_register_trims_whitespace() {
    let app = TestApp::new();

    let (status, _) = register(&app, "  alice  ", "secret123", 1).await;
    assert_eq!(status, StatusCode::CREATED);

    // The trimmed login is what got stored.
    let (status, _) = login(&app, "alice", "secret123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();

    register(&app, "bob", "secret123", 1).await;

    let (wrong_status, wrong_body) = login(&app, "bob", "not-the-password").await;
    let (unknown_status, unknown_body) = login(&app, "nobody", "secret123").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    // No user enumeration: identical bodies for both failure causes.
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_refresh_rotates_both_tokens() {
    let app = TestApp::new();

    register(&app, "alice", "secret123", 1).await;
    let (_, body) = login(&app, "alice", "secret123").await;
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .post_with_bearer("/api/v1/auth/refresh", &refresh_token, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let new_access = body["access_token"].as_str().unwrap();
    let new_refresh = body["refresh_token"].as_str().unwrap();

    assert!(app.codec.validate_access(new_access).is_ok());
    assert!(app.codec.validate_refresh(new_refresh).is_ok());
}

#[tokio::test]
async fn test_refresh_reflects_current_stored_role() {
    let app = TestApp::new();

    register(&app, "alice", "secret123", 1).await;
    let (_, body) = login(&app, "alice", "secret123").await;
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    let claims = app.codec.validate_refresh(&refresh_token).unwrap();
    assert!(app.store.set_role(claims.id, auth::Role::Manager));

    let (status, body) = app
        .post_with_bearer("/api/v1/auth/refresh", &refresh_token, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let access = app
        .codec
        .validate_access(body["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(access.role, auth::Role::Manager);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();

    register(&app, "alice", "secret123", 1).await;
    let (_, body) = login(&app, "alice", "secret123").await;
    let access_token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .post_with_bearer("/api/v1/auth/refresh", &access_token, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthorized");
}

#[tokio::test]
async fn test_refresh_without_token() {
    let app = TestApp::new();

    let (status, _) = app
        .post("/api/v1/auth/refresh", json!({}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_rejected_on_protected_route() {
    let app = TestApp::new();

    register(&app, "alice", "secret123", 1).await;
    let (_, body) = login(&app, "alice", "secret123").await;
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    let (status, _) = app
        .get_with_bearer("/api/v1/auth/user-info", &refresh_token)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_info_when_identity_vanished() {
    let app = TestApp::new();

    register(&app, "alice", "secret123", 1).await;
    let (_, body) = login(&app, "alice", "secret123").await;
    let access_token = body["access_token"].as_str().unwrap().to_string();

    let claims = app.codec.validate_access(&access_token).unwrap();
    assert!(app.store.remove(claims.id));

    let (status, body) = app
        .get_with_bearer("/api/v1/auth/user-info", &access_token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/v1/auth/user-info").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_password_flow() {
    let app = TestApp::new();

    register(&app, "alice", "secret123", 1).await;

    let (status, _) = app
        .post(
            "/api/v1/auth/update-password",
            json!({ "login": "alice", "password": "brand-new-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = login(&app, "alice", "secret123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = login(&app, "alice", "brand-new-pass").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_password_unknown_login() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/v1/auth/update-password",
            json!({ "login": "ghost", "password": "whatever" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn test_project_ownership_enforced() {
    let app = TestApp::new();

    register(&app, "alice", "secret123", 1).await;
    // Privileged role still gets no ownership bypass.
    register(&app, "bob", "secret456", 3).await;

    let (_, body) = login(&app, "alice", "secret123").await;
    let alice_token = body["access_token"].as_str().unwrap().to_string();
    let (_, body) = login(&app, "bob", "secret456").await;
    let bob_token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .post_with_bearer(
            "/api/v1/projects",
            &alice_token,
            Some(json!({ "title": "launch plan", "description": "q3" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let project_id = body["project_id"].as_i64().unwrap();

    let path = format!("/api/v1/projects/{}", project_id);

    let (status, _) = app.get_with_bearer(&path, &alice_token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get_with_bearer(&path, &bob_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "forbidden");

    let (status, _) = app
        .put_with_bearer(&path, &bob_token, json!({ "description": "hijacked" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put_with_bearer(&path, &alice_token, json!({ "description": "revised" }))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_project_duplicate_title_conflict() {
    let app = TestApp::new();

    register(&app, "alice", "secret123", 1).await;
    let (_, body) = login(&app, "alice", "secret123").await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, _) = app
        .post_with_bearer(
            "/api/v1/projects",
            &token,
            Some(json!({ "title": "launch plan" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post_with_bearer(
            "/api/v1/projects",
            &token,
            Some(json!({ "title": "launch plan" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");
}

#[tokio::test]
async fn test_incomplete_request_body_gets_validation_error() {
    let app = TestApp::new();

    // Missing fields must answer with the stable error shape, not the
    // extractor's plain-text rejection.
    let (status, body) = app
        .post("/api/v1/auth/register", json!({ "login": "alice" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unparseable_request_body_gets_validation_error() {
    let app = TestApp::new();

    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn test_cookie_mode_sets_refresh_cookie() {
    let app = TestApp::with_cookie_mode(true);

    register(&app, "alice", "secret123", 1).await;

    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&json!({ "login": "alice", "password": "secret123" })).unwrap(),
        ))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("missing Set-Cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("refresh_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));

    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    // Cookie mode keeps the refresh token out of the body.
    assert!(body["refresh_token"].is_null());
    assert!(body["access_token"].is_string());

    // Refresh accepts the cookie transport and rotates it.
    let cookie_pair = set_cookie.split(';').next().unwrap().to_string();
    let (status, body) = app
        .post_with_cookie("/api/v1/auth/refresh", &cookie_pair)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
}
