//! Login, logout and session gate tests.

mod helpers;

use axum::http::{Method, StatusCode};
use cookie::SameSite;
use serde_json::json;

use helpers::{PASSWORD, TestApp, USERNAME};

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/api/v1/login",
            Some(json!({ "username": USERNAME, "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["message"].is_string());

    let cookie = response.session_cookie().expect("session cookie");
    assert_eq!(cookie.value().len(), 342);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(cookie::time::Duration::seconds(86_400)));

    assert_eq!(app.state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_cookie_secure_flag_follows_config() {
    let app = TestApp::with_config(|c| c.session.cookie_secure = false);
    let response = app
        .request(
            Method::POST,
            "/api/v1/login",
            Some(json!({ "username": USERNAME, "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_ne!(response.session_cookie().unwrap().secure(), Some(true));
    assert!(!response.raw_session_cookie().unwrap().contains("Secure"));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let app = TestApp::new();

    let wrong = app
        .request(
            Method::POST,
            "/api/v1/login",
            Some(json!({ "username": USERNAME, "password": "nope" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            Method::POST,
            "/api/v1/login",
            Some(json!({ "username": "ghost", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert!(wrong.session_cookie().is_none());
    assert!(unknown.session_cookie().is_none());
    assert!(app.state.sessions.is_empty().await);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::new();

    for body in [
        json!({ "username": USERNAME }),
        json!({ "password": PASSWORD }),
        json!({ "username": "", "password": PASSWORD }),
        json!({ "username": USERNAME, "password": "" }),
        json!({}),
    ] {
        let response = app.request(Method::POST, "/api/v1/login", Some(body), None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let app = TestApp::new();

    let response = app
        .request_raw(
            Method::POST,
            "/api/v1/login",
            Some(("application/json", "{not json".to_string())),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request_raw(
            Method::POST,
            "/api/v1/login",
            Some(("text/plain", "username=testuser".to_string())),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_always_clears_cookie() {
    let app = TestApp::new();

    // No cookie at all.
    let response = app.request(Method::POST, "/api/v1/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let raw = response.raw_session_cookie().expect("removal cookie");
    assert!(raw.contains("Max-Age=-1"));
    assert!(raw.starts_with("session_id=;"));

    // Unknown token.
    let response = app
        .request(Method::POST, "/api/v1/logout", None, Some("bogus"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.raw_session_cookie().unwrap().contains("Max-Age=-1"));
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let app = TestApp::new();
    let token = app.login().await;

    let listing = app.browse("path=/", Some(&token)).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["name"], "/");

    let logout = app
        .request(Method::POST, "/api/v1/logout", None, Some(&token))
        .await;
    assert_eq!(logout.status, StatusCode::OK);
    assert!(logout.raw_session_cookie().unwrap().contains("Max-Age=-1"));
    assert!(app.state.sessions.is_empty().await);

    let after = app.browse("path=/", Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    assert_eq!(after.body["message"], "Unauthorized");
}

#[tokio::test]
async fn test_browse_requires_session() {
    let app = TestApp::new();

    let missing = app.browse("path=/", None).await;
    let bogus = app.browse("path=/", Some("not-a-session")).await;
    let empty = app.browse("path=/", Some("")).await;

    for response in [missing, bogus, empty] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["error"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let app = TestApp::with_config(|c| c.session.ttl_seconds = 1);
    let token = app.login().await;

    tokio::time::sleep(std::time::Duration::from_millis(1_100)).await;

    let response = app.browse("path=/", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_methods_get_405() {
    let app = TestApp::new();

    for (method, uri) in [
        (Method::GET, "/api/v1/login"),
        (Method::PUT, "/api/v1/login"),
        (Method::GET, "/api/v1/logout"),
        (Method::DELETE, "/api/v1/logout"),
        (Method::POST, "/api/v1/browse"),
        (Method::DELETE, "/api/v1/browse"),
        (Method::POST, "/api/v1/health"),
    ] {
        let response = app.request(method.clone(), uri, None, None).await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert_eq!(response.body["error"], "METHOD_NOT_ALLOWED");
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let response = app.request(Method::GET, "/api/v1/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body.get("sessions").is_none());
}
