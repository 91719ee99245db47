//! Server-computed aggregate counts.

use serde::{Deserialize, Serialize};

/// Counts over the request statuses, always recomputed server-side.
///
/// Authoritative by contract: the client never derives these from its
/// locally held list (the two can diverge transiently after a filtered
/// search replaces the local list).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: u64,
    #[serde(rename = "pendentes")]
    pub pending: u64,
    #[serde(rename = "em_oracao")]
    pub in_prayer: u64,
    #[serde(rename = "respondidos")]
    pub answered: u64,
    #[serde(rename = "arquivados")]
    pub archived: u64,
}
