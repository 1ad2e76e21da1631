//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential validation settings and the seeded user set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Argon2id cost parameters, shared by real and dummy hashes.
    #[serde(default)]
    pub argon2: Argon2Config,
    /// Users seeded at startup. There is no registration flow.
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KiB.
    #[serde(default = "default_memory")]
    pub memory_kib: u32,
    /// Number of passes.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_kib: default_memory(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

/// A user seeded from configuration.
///
/// Exactly one of `password_hash` (a PHC string) or `password` (plaintext,
/// hashed at startup) must be present.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserSeed {
    /// Unique username.
    pub username: String,
    /// Argon2id PHC hash string.
    #[serde(default)]
    pub password_hash: Option<String>,
    /// Plaintext password, for development setups.
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for UserSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSeed")
            .field("username", &self.username)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// Argon2 crate defaults (OWASP minimum for Argon2id).
fn default_memory() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
