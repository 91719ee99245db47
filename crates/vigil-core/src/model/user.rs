//! User account types.

use serde::{Deserialize, Serialize};

/// A registered user, as reported by the service.
///
/// Read-only from the client's perspective except for the admin-toggle
/// operation. `is_admin` gates status transitions and user
/// administration server-side; the client only mirrors it for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(rename = "nome_completo", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "is_admin", default)]
    pub is_admin: bool,
}

impl User {
    /// Name to show in the UI: the full display name when present,
    /// otherwise the username.
    pub fn label(&self) -> &str {
        match &self.display_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

/// Profile fields sent to the registration endpoint.
///
/// Registration does not establish a session; an explicit login is
/// required afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterProfile {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(rename = "nome_completo")]
    pub display_name: String,
}
