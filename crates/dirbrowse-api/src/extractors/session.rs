//! `SessionUser` extractor for the session admitted by the session gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use dirbrowse_core::error::AppError;
use dirbrowse_entity::session::Session;

use crate::error::ApiError;

/// The live session of the current request.
///
/// Only available on routes behind
/// [`require_session`](crate::middleware::auth::require_session).
#[derive(Debug, Clone)]
pub struct SessionUser(pub Session);

impl SessionUser {
    /// The authenticated user id.
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }
}

impl std::ops::Deref for SessionUser {
    type Target = Session;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(SessionUser)
            .ok_or_else(|| AppError::unauthenticated().into())
    }
}
