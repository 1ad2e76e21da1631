//! Session entity model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated browser session.
///
/// Created on login, destroyed on logout or lazily after expiry. The `id`
/// is the opaque token carried in the session cookie.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque URL-safe token.
    pub id: String,
    /// The user this session belongs to.
    pub user_id: String,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires. Never moves after creation.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session valid for `ttl` starting at `now`.
    pub fn new(id: String, user_id: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Whether the session is expired at `now`.
    ///
    /// A session stays valid up to and including `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

// The token is a bearer credential; keep it out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
