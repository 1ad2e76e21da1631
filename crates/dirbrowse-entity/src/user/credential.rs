//! Stored credential model.

/// A username and its Argon2id PHC hash string.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Unique username.
    pub username: String,
    /// PHC-encoded password hash.
    pub password_hash: String,
}

impl CredentialRecord {
    /// Creates a new credential record.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
