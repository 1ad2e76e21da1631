//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
///
/// Missing fields deserialize as empty strings so they fail validation
/// instead of the JSON extractor.
#[derive(Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Query parameters for `GET /browse`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseQuery {
    /// Path below the root. Missing or empty means the root.
    pub path: Option<String>,
}

impl BrowseQuery {
    /// The requested path, defaulting to `/`.
    pub fn path_or_root(&self) -> &str {
        match self.path.as_deref() {
            None | Some("") => "/",
            Some(path) => path,
        }
    }
}
