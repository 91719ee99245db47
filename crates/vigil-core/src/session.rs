//! Session snapshot and its durable storage contract.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::User;

/// The persisted authentication state: the bearer token and the user
/// snapshot it was issued for.
///
/// The two always travel together — saved as a unit on login, cleared
/// as a unit on logout. The user half is for optimistic display only;
/// authorization decisions always belong to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub token: String,
    pub user: User,
}

/// Durable key-value storage for the session snapshot.
///
/// All operations are synchronous. Implementations must make `clear` a
/// no-op when nothing is stored, so that logout stays idempotent.
pub trait SessionStore: Send + Sync {
    /// Returns the stored snapshot, or `None` when no session is persisted.
    fn load(&self) -> Result<Option<SessionSnapshot>>;

    /// Persists the snapshot, replacing any previous one.
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;

    /// Removes the persisted snapshot, if any.
    fn clear(&self) -> Result<()>;
}
