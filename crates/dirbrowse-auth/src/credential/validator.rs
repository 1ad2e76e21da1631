//! Username/password validation against the seeded credential set.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use argon2::password_hash::PasswordHash;
use tracing::{info, warn};

use dirbrowse_core::config::{AuthConfig, UserSeed};
use dirbrowse_core::error::AppError;
use dirbrowse_core::result::AppResult;
use dirbrowse_core::traits::auth::Authenticator;
use dirbrowse_entity::user::CredentialRecord;

use crate::password::PasswordHasher;

/// Length of the zero buffer behind the dummy hash.
pub const DUMMY_PASSWORD_LEN: usize = 60;

/// Validates credentials against an immutable username -> hash map.
///
/// Unknown usernames are verified against a dummy hash built with the same
/// Argon2 parameters as real passwords, so both failure paths do the same
/// work and return the same error.
pub struct CredentialValidator {
    hasher: PasswordHasher,
    users: HashMap<String, String>,
    dummy_hash: String,
}

impl CredentialValidator {
    /// Builds a validator from pre-hashed records.
    ///
    /// Fails on a malformed PHC string or a duplicate username. Hashes made
    /// with different cost parameters are accepted with a warning.
    pub fn new(hasher: PasswordHasher, records: Vec<CredentialRecord>) -> AppResult<Self> {
        let dummy_hash = hasher.hash_bytes(&[0u8; DUMMY_PASSWORD_LEN])?;

        let mut users = HashMap::with_capacity(records.len());
        for record in records {
            let parsed = PasswordHash::new(&record.password_hash).map_err(|e| {
                AppError::configuration(format!(
                    "Malformed password hash for user '{}': {e}",
                    record.username
                ))
            })?;
            if !hasher.has_matching_cost(&parsed) {
                warn!(
                    username = %record.username,
                    "Stored hash does not use the configured Argon2id parameters"
                );
            }

            match users.entry(record.username) {
                Entry::Occupied(slot) => {
                    return Err(AppError::configuration(format!(
                        "Duplicate user '{}'",
                        slot.key()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(record.password_hash);
                }
            }
        }

        info!(users = users.len(), "Credential validator ready");
        Ok(Self {
            hasher,
            users,
            dummy_hash,
        })
    }

    /// Builds a validator from the `auth` configuration section, hashing
    /// plaintext seeds at startup.
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        let hasher = PasswordHasher::new(&config.argon2)?;
        let records = config
            .users
            .iter()
            .map(|seed| seed_to_record(&hasher, seed))
            .collect::<AppResult<Vec<_>>>()?;
        Self::new(hasher, records)
    }

    /// Number of known users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    fn verify_or_reject(&self, password: &str, hash: &str) -> AppResult<()> {
        match self.hasher.verify_password(password, hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::invalid_credentials()),
            Err(e) => {
                warn!(error = %e, "Password verification errored");
                Err(AppError::invalid_credentials())
            }
        }
    }
}

impl Authenticator for CredentialValidator {
    fn validate_credentials(&self, username: &str, password: &str) -> AppResult<()> {
        match self.users.get(username) {
            Some(hash) => self.verify_or_reject(password, hash),
            None => {
                // Result discarded; the call only spends the same time.
                let _ = self.verify_or_reject(password, &self.dummy_hash);
                Err(AppError::invalid_credentials())
            }
        }
    }
}

impl std::fmt::Debug for CredentialValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialValidator")
            .field("users", &self.users.len())
            .finish_non_exhaustive()
    }
}

fn seed_to_record(hasher: &PasswordHasher, seed: &UserSeed) -> AppResult<CredentialRecord> {
    if seed.username.is_empty() {
        return Err(AppError::configuration("Seeded user has an empty username"));
    }
    let hash = match (&seed.password_hash, &seed.password) {
        (Some(hash), None) => hash.clone(),
        (None, Some(plain)) => {
            warn!(username = %seed.username, "Hashing plaintext password from configuration");
            hasher.hash_password(plain)?
        }
        _ => {
            return Err(AppError::configuration(format!(
                "User '{}' needs exactly one of password_hash or password",
                seed.username
            )));
        }
    };
    Ok(CredentialRecord::new(&seed.username, hash))
}
