//! Shared test infrastructure for API integration tests.
//!
//! Builds the real router over a temporary root and drives it in-process
//! with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use cookie::Cookie;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use dirbrowse_api::{AppState, build_app};
use dirbrowse_core::config::{AppConfig, Argon2Config, UserSeed};

pub const USERNAME: &str = "testuser";
pub const PASSWORD: &str = "password123";

/// Test application context.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    /// Kept alive for the lifetime of the app.
    pub root: TempDir,
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `session_id` cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<Cookie<'static>> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| Cookie::parse(v.to_owned()).ok())
            .find(|c| c.name() == "session_id")
    }

    /// Raw `Set-Cookie` header for the session cookie.
    pub fn raw_session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("session_id="))
            .map(str::to_owned)
    }
}

impl TestApp {
    /// Builds the app over the standard fixture tree:
    ///
    /// ```text
    /// root/
    ///   dir1/ file1.txt (100) file2.txt (200) subdir/ file3.txt (300)
    ///   empty/
    /// ```
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Same as [`TestApp::new`] with a config tweak applied before startup.
    pub fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let base = root.path();
        std::fs::create_dir_all(base.join("dir1/subdir")).unwrap();
        std::fs::create_dir(base.join("empty")).unwrap();
        std::fs::write(base.join("dir1/file1.txt"), vec![b'a'; 100]).unwrap();
        std::fs::write(base.join("dir1/file2.txt"), vec![b'b'; 200]).unwrap();
        std::fs::write(base.join("dir1/subdir/file3.txt"), vec![b'c'; 300]).unwrap();

        let mut config = AppConfig::default();
        config.browse.root_path = base.to_string_lossy().into_owned();
        config.auth.argon2 = Argon2Config {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        };
        config.auth.users = vec![UserSeed {
            username: USERNAME.into(),
            password_hash: None,
            password: Some(PASSWORD.into()),
        }];
        tweak(&mut config);

        let state = AppState::from_config(config).expect("state");
        let router = build_app(state.clone());

        Self {
            router,
            state,
            root,
        }
    }

    /// Sends a request with an optional JSON body and session token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        json: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let body = json.map(|v| v.to_string());
        self.request_raw(method, uri, body.map(|b| ("application/json", b)), session)
            .await
    }

    /// Sends a request with an optional raw body and content type.
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        body: Option<(&str, String)>,
        session: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = session {
            builder = builder.header(header::COOKIE, format!("session_id={token}"));
        }
        let body = match body {
            Some((content_type, text)) => {
                builder = builder.header(header::CONTENT_TYPE, content_type);
                Body::from(text)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Logs in as the seeded user and returns the session token.
    pub async fn login(&self) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/v1/login",
                Some(serde_json::json!({ "username": USERNAME, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response
            .session_cookie()
            .expect("session cookie")
            .value()
            .to_owned()
    }

    /// GET /api/v1/browse with the given raw query string.
    pub async fn browse(&self, query: &str, session: Option<&str>) -> TestResponse {
        let uri = if query.is_empty() {
            "/api/v1/browse".to_string()
        } else {
            format!("/api/v1/browse?{query}")
        };
        self.request(Method::GET, &uri, None, session).await
    }
}
