//! Unified path management for Vigil's durable client state.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Vigil.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/vigil/             # Config directory
/// ├── config.toml              # Client configuration (service URL)
/// └── session.json             # Persisted session snapshot
/// ```
pub struct VigilPaths;

impl VigilPaths {
    /// Returns the Vigil configuration directory.
    ///
    /// Resolved via the platform config directory (XDG on Linux,
    /// the platform equivalent elsewhere).
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/vigil/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("vigil"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the client configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session snapshot.
    ///
    /// # Security Note
    ///
    /// The file holds the bearer token; the storage layer writes it
    /// with 600 permissions on Unix.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}
