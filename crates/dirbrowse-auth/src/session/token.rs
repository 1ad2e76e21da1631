//! Opaque session token generation.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use dirbrowse_core::error::AppError;
use dirbrowse_core::result::AppResult;

/// Number of random bytes behind every session token.
pub const TOKEN_BYTES: usize = 256;

/// Source of fresh session tokens.
pub trait TokenGenerator: Send + Sync + std::fmt::Debug + 'static {
    /// Produce a new URL-safe token, or an
    /// [`ErrorKind::EntropyUnavailable`](dirbrowse_core::error::ErrorKind::EntropyUnavailable)
    /// error if no secure randomness is available.
    fn generate(&self) -> AppResult<String>;
}

/// Draws [`TOKEN_BYTES`] bytes from the operating system CSPRNG and encodes
/// them as unpadded URL-safe base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsTokenGenerator;

impl TokenGenerator for OsTokenGenerator {
    fn generate(&self) -> AppResult<String> {
        let mut bytes = vec![0u8; TOKEN_BYTES];
        OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
            AppError::entropy_unavailable(format!("Secure random source failed: {e}"))
        })?;
        Ok(URL_SAFE_NO_PAD.encode(&bytes))
    }
}
