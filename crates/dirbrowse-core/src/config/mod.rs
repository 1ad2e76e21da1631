//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files plus `DIRBROWSE__*` environment variables. Every
//! section carries serde defaults so the server starts with no files at all.

pub mod app;
pub mod auth;
pub mod browse;
pub mod logging;
pub mod session;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{Argon2Config, AuthConfig, UserSeed};
pub use self::browse::BrowseConfig;
pub use self::logging::LoggingConfig;
pub use self::session::{SESSION_COOKIE_NAME, SessionConfig};

use crate::error::AppError;

/// Legacy environment variable that overrides `browse.root_path`.
pub const ROOT_PATH_ENV: &str = "ROOT_PATH";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session and cookie settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Directory browsing settings.
    #[serde(default)]
    pub browse: BrowseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.toml`, `config/{env}.toml`
    /// and `DIRBROWSE__*` environment variables, in that order.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env)
    }

    /// Same as [`AppConfig::load`] with an explicit configuration directory.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, AppError> {
        let default_file = dir.join("default");
        let env_file = dir.join(env);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&env_file.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("DIRBROWSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut app: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        if let Ok(root) = std::env::var(ROOT_PATH_ENV) {
            if !root.is_empty() {
                app.browse.root_path = root;
            }
        }

        Ok(app)
    }
}
