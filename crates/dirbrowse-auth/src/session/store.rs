//! In-memory session store with lazy expiry.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use dirbrowse_core::config::SessionConfig;
use dirbrowse_core::error::AppError;
use dirbrowse_core::result::AppResult;
use dirbrowse_entity::session::Session;

use super::token::{OsTokenGenerator, TokenGenerator};

/// Upper bound for configured lifetimes, keeps `now + ttl` in range.
const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Fresh tokens drawn before giving up on a collision.
const MAX_TOKEN_ATTEMPTS: usize = 4;

type SessionMap = HashMap<String, Session>;

/// Concurrency-safe map from session token to [`Session`].
///
/// `get` takes the read lock; `create`, `delete` and expiry removal take
/// the write lock. Token generation and logging happen outside the lock.
/// There is no background sweep: an expired entry stays in memory until it
/// is looked up again or the process restarts.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<SessionMap>>,
    tokens: Arc<dyn TokenGenerator>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates an empty store using the configured TTL and OS randomness.
    ///
    /// A zero TTL is a configuration error. Lifetimes above one year are
    /// clamped to one year.
    pub fn new(config: &SessionConfig) -> AppResult<Self> {
        if config.ttl_seconds == 0 {
            return Err(AppError::configuration(
                "session.ttl_seconds must be greater than zero",
            ));
        }
        if config.ttl_seconds > MAX_TTL_SECONDS {
            warn!(
                configured = config.ttl_seconds,
                max = MAX_TTL_SECONDS,
                "Session TTL clamped to the maximum"
            );
        }
        let secs = config.ttl_seconds.min(MAX_TTL_SECONDS) as i64;
        Ok(Self::with_ttl(Duration::seconds(secs)))
    }

    /// Creates an empty store with an explicit TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            tokens: Arc::new(OsTokenGenerator),
            ttl,
        }
    }

    /// Replaces the token source.
    pub fn with_token_generator(mut self, tokens: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Session lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Creates and stores a new session for `user_id`.
    ///
    /// Fails when the random source is unavailable, or when every drawn
    /// token collides with a live one.
    pub async fn create(&self, user_id: &str) -> AppResult<Session> {
        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let token = self.tokens.generate().inspect_err(|e| {
                error!(error = %e, "Session token generation failed");
            })?;
            let session = Session::new(token, user_id, Utc::now(), self.ttl);

            let inserted = {
                let mut sessions = self.sessions.write().await;
                match sessions.entry(session.id.clone()) {
                    Entry::Occupied(_) => false,
                    Entry::Vacant(slot) => {
                        slot.insert(session.clone());
                        true
                    }
                }
            };

            if inserted {
                debug!(user_id, expires_at = %session.expires_at, "Session created");
                return Ok(session);
            }
            error!("Session token collision; drawing a new token");
        }

        Err(AppError::internal("Could not allocate a unique session token"))
    }

    /// Looks up a live session.
    ///
    /// Unknown and expired tokens both return `None`. An expired entry is
    /// removed by a spawned task after the read lock is released, so the
    /// caller never waits on the write lock.
    pub async fn get(&self, token: &str) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            let session = sessions.get(token)?;
            if !session.is_expired_at(Utc::now()) {
                return Some(session.clone());
            }
        }

        let sessions = Arc::clone(&self.sessions);
        let token = token.to_owned();
        tokio::spawn(async move {
            remove_if_expired(&sessions, &token).await;
        });

        None
    }

    /// Removes a session. Deleting an unknown token is a no-op.
    pub async fn delete(&self, token: &str) {
        let removed = self.sessions.write().await.remove(token);
        if let Some(session) = removed {
            debug!(user_id = %session.user_id, "Session deleted");
        }
    }

    /// Number of stored entries, including expired ones not yet removed.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

async fn remove_if_expired(sessions: &RwLock<SessionMap>, token: &str) {
    let mut sessions = sessions.write().await;
    let expired = sessions
        .get(token)
        .is_some_and(|s| s.is_expired_at(Utc::now()));
    if expired {
        sessions.remove(token);
        debug!("Expired session removed");
    }
}
