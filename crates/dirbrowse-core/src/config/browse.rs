//! Directory browsing configuration.

use serde::{Deserialize, Serialize};

/// Settings for the confined directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// The single root every request is confined to.
    #[serde(default = "default_root_path")]
    pub root_path: String,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
        }
    }
}

fn default_root_path() -> String {
    "./".to_string()
}
