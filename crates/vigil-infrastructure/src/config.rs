//! Client configuration: where the remote service lives.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use vigil_core::error::Result;

use crate::paths::VigilPaths;

/// Default service endpoint, matching the development server.
const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding the service endpoint.
const API_URL_ENV: &str = "VIGIL_API_URL";

/// Client configuration, normally loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote service, including the `/api` prefix.
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Builds a configuration pointing at an explicit endpoint.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Loads configuration with the standard priority:
    ///
    /// 1. `config.toml` in the Vigil config directory
    /// 2. The `VIGIL_API_URL` environment variable
    /// 3. The built-in default
    pub fn load() -> Self {
        if let Ok(path) = VigilPaths::config_file() {
            match Self::load_from(&path) {
                Ok(Some(config)) => {
                    tracing::debug!("[ClientConfig] Loaded {}", path.display());
                    return config;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("[ClientConfig] Ignoring unreadable {}: {}", path.display(), e);
                }
            }
        }

        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return Self::with_api_url(url);
            }
        }

        Self::default()
    }

    /// Loads from a specific TOML file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ClientConfig))`: Successfully loaded and parsed
    /// - `Ok(None)`: File doesn't exist
    /// - `Err`: Failed to read or parse the file
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(Some(config))
    }
}
