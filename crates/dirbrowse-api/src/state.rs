//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use dirbrowse_auth::credential::CredentialValidator;
use dirbrowse_auth::session::SessionStore;
use dirbrowse_core::config::AppConfig;
use dirbrowse_core::result::AppResult;
use dirbrowse_core::traits::auth::Authenticator;
use dirbrowse_storage::PathResolver;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Cloning is cheap:
/// every field is reference counted.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Credential backend
    pub authenticator: Arc<dyn Authenticator>,
    /// In-memory session store
    pub sessions: SessionStore,
    /// Root-confined path resolver
    pub resolver: Arc<PathResolver>,
}

impl AppState {
    /// Builds the default components from configuration.
    ///
    /// Fails if the browse root is unusable, the Argon2 parameters or the
    /// session TTL are invalid, or a seeded user is malformed.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let resolver = PathResolver::new(&config.browse.root_path)?;
        let authenticator = CredentialValidator::from_config(&config.auth)?;
        let sessions = SessionStore::new(&config.session)?;

        Ok(Self {
            config: Arc::new(config),
            authenticator: Arc::new(authenticator),
            sessions,
            resolver: Arc::new(resolver),
        })
    }
}
