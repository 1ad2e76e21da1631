//! Auth handlers: login and logout.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum_extra::extract::CookieJar;
use tracing::info;
use validator::Validate;

use dirbrowse_core::config::SESSION_COOKIE_NAME;
use dirbrowse_core::error::AppError;

use crate::cookies;
use crate::dto::request::LoginRequest;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/v1/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let Json(req) = payload
        .map_err(|e| AppError::validation(format!("Invalid request body: {}", e.body_text())))?;
    req.validate()
        .map_err(|_| AppError::validation("Username and password are required"))?;

    // Argon2 is CPU-bound; keep it off the async workers.
    let authenticator = Arc::clone(&state.authenticator);
    let LoginRequest { username, password } = req;
    let checked = username.clone();
    tokio::task::spawn_blocking(move || authenticator.validate_credentials(&checked, &password))
        .await
        .map_err(|e| AppError::internal(format!("Credential check did not complete: {e}")))?
        .inspect_err(|_| info!(username = %username, "Login failed"))?;

    let session = state.sessions.create(&username).await?;
    info!(username = %username, "User logged in");

    let cookie = cookies::session_cookie(
        &session.id,
        state.sessions.ttl().num_seconds(),
        state.config.session.cookie_secure,
    );

    Ok((jar.add(cookie), Json(MessageResponse::new("Login successful"))))
}

/// POST /api/v1/logout
///
/// Always succeeds and always clears the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    if let Some(token) = jar
        .get(SESSION_COOKIE_NAME)
        .map(|c| c.value())
        .filter(|v| !v.is_empty())
    {
        state.sessions.delete(token).await;
        info!("User logged out");
    }

    let jar = jar.add(cookies::removal_cookie(state.config.session.cookie_secure));
    (jar, Json(MessageResponse::new("Logout successful")))
}
