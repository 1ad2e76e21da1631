//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString,
        rand_core::{OsRng, RngCore},
    },
};

use dirbrowse_core::config::Argon2Config;
use dirbrowse_core::error::AppError;

const SALT_BYTES: usize = 16;

/// Handles password hashing and verification using Argon2id with a fixed
/// set of cost parameters.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Creates a hasher from configured cost parameters.
    pub fn new(config: &Argon2Config) -> Result<Self, AppError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        self.hash_bytes(password.as_bytes())
    }

    /// Hashes arbitrary bytes with a random salt.
    pub fn hash_bytes(&self, secret: &[u8]) -> Result<String, AppError> {
        let mut salt = [0u8; SALT_BYTES];
        OsRng.try_fill_bytes(&mut salt).map_err(|e| {
            AppError::entropy_unavailable(format!("Secure random source failed: {e}"))
        })?;
        let salt = SaltString::encode_b64(&salt)
            .map_err(|e| AppError::internal(format!("Salt encoding failed: {e}")))?;

        let hash = self
            .argon2()
            .hash_password(secret, &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored PHC hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not. The
    /// cost of the check is the cost encoded in `hash`.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Whether `hash` is an Argon2id hash made with this hasher's parameters.
    pub fn has_matching_cost(&self, hash: &PasswordHash<'_>) -> bool {
        if hash.algorithm != argon2::ARGON2ID_IDENT {
            return false;
        }
        match Params::try_from(hash) {
            Ok(p) => {
                p.m_cost() == self.params.m_cost()
                    && p.t_cost() == self.params.t_cost()
                    && p.p_cost() == self.params.p_cost()
            }
            Err(_) => false,
        }
    }
}
