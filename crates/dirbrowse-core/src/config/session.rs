//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Session lifetime and cookie settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in seconds. Activity does not extend it.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Whether the cookie carries the `Secure` attribute.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            cookie_secure: true,
        }
    }
}

fn default_ttl() -> u64 {
    24 * 60 * 60
}

fn default_true() -> bool {
    true
}
