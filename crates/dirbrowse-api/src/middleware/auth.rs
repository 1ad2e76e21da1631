//! Session gate for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use tracing::debug;

use dirbrowse_core::config::SESSION_COOKIE_NAME;
use dirbrowse_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Admits a request only if it carries a live `session_id` cookie.
///
/// Rejected requests get a 401 and never reach the handler. Admitted ones
/// carry the [`Session`](dirbrowse_entity::session::Session) in their
/// extensions for [`SessionUser`](crate::extractors::SessionUser). The
/// session's expiry is left untouched.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(SESSION_COOKIE_NAME)
        .map(|c| c.value())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            debug!(path = %request.uri().path(), "No session cookie");
            AppError::unauthenticated()
        })?;

    let session = state.sessions.get(token).await.ok_or_else(|| {
        debug!(path = %request.uri().path(), "Unknown or expired session");
        AppError::unauthenticated()
    })?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
