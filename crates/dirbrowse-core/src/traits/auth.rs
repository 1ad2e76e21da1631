//! Credential backend trait.

use crate::result::AppResult;

/// Checks a username/password pair.
///
/// Implementations must make a failure for an unknown user cost the same as
/// a failure for a wrong password, and must report both as
/// [`ErrorKind::InvalidCredentials`](crate::error::ErrorKind::InvalidCredentials).
///
/// Verification is CPU-bound and synchronous; async callers should run it on
/// a blocking thread.
pub trait Authenticator: Send + Sync + std::fmt::Debug + 'static {
    /// Returns `Ok(())` if the credentials are valid.
    fn validate_credentials(&self, username: &str, password: &str) -> AppResult<()>;
}
