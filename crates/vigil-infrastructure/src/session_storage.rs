//! Durable storage for the session snapshot.
//!
//! The token and user snapshot live in a single JSON document, so the
//! pair is persisted and cleared as a unit.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use vigil_core::error::{Result, VigilError};
use vigil_core::session::{SessionSnapshot, SessionStore};

use crate::paths::VigilPaths;

/// File-backed session storage (`~/.config/vigil/session.json`).
///
/// Responsibilities:
/// - Load the persisted snapshot at process start
/// - Replace it on login, remove it on logout
/// - Keep writes atomic so a crash never leaves a torn snapshot
///
/// Does NOT:
/// - Validate the token (that is the service's job, via verify)
/// - Cache anything in memory (the client holds the live copy)
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    /// Creates a store at the default platform path.
    pub fn new() -> Result<Self> {
        let path = VigilPaths::session_file().map_err(|e| VigilError::storage(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to the session file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let snapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;

        // Sibling temp file + rename keeps the snapshot whole across a
        // crash mid-write.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;

        // The file holds the bearer token: user read/write only on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &self.path)?;
        tracing::debug!("[SessionStore] Saved session snapshot to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("[SessionStore] Cleared session snapshot at {}", self.path.display());
                Ok(())
            }
            // Clearing an absent session is a no-op: logout stays idempotent.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory session storage, for tests and embedders that manage their
/// own persistence.
#[derive(Default)]
pub struct MemorySessionStore {
    snapshot: Mutex<Option<SessionSnapshot>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, Option<SessionSnapshot>>> {
        self.snapshot
            .lock()
            .map_err(|_| VigilError::internal("session store lock poisoned"))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.guard()?.clone())
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        *self.guard()? = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.guard()? = None;
        Ok(())
    }
}
