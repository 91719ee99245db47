//! Comments and testimonies attached to a request.

use serde::{Deserialize, Serialize};

/// A comment on a prayer request. Append-only: the client never edits
/// or deletes one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "conteudo")]
    pub content: String,
    /// Creation timestamp, kept as the opaque string the service sends.
    #[serde(rename = "data_comentario")]
    pub created_at: String,
}
