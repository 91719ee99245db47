//! Prayer request types: the tracked entity, its status lifecycle, and
//! the client-side write shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VigilError};
use crate::model::comment::Comment;

/// Workflow status of a prayer request.
///
/// The wire values are the service's canonical labels; transitions are
/// admin-controlled and enforced server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Newly submitted, not yet taken up. Initial state for new requests.
    #[serde(rename = "Pendente")]
    Pending,
    /// Actively being prayed for.
    #[serde(rename = "Em Oração")]
    InPrayer,
    /// Marked as answered.
    #[serde(rename = "Respondido")]
    Answered,
    /// Closed and kept for the record.
    #[serde(rename = "Arquivado")]
    Archived,
}

impl Status {
    /// All statuses in lifecycle order.
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InPrayer,
        Status::Answered,
        Status::Archived,
    ];

    /// Returns the wire label used by the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pendente",
            Status::InPrayer => "Em Oração",
            Status::Answered => "Respondido",
            Status::Archived => "Arquivado",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Pendente" => Ok(Status::Pending),
            "Em Oração" => Ok(Status::InPrayer),
            "Respondido" => Ok(Status::Answered),
            "Arquivado" => Ok(Status::Archived),
            _ => Err(VigilError::validation(format!("unknown status: {s}"))),
        }
    }
}

/// Status constraint applied to searches and local display filtering.
///
/// `All` is the "no constraint" sentinel: it matches every status and
/// contributes no query parameter to a server search, so searching with
/// `All` is the same call as searching with no status at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    /// True when `status` passes the filter.
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// Wire value for the `status` query parameter; absent for `All`.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status.as_str()),
        }
    }
}

impl From<Option<Status>> for StatusFilter {
    fn from(status: Option<Status>) -> Self {
        match status {
            Some(status) => StatusFilter::Only(status),
            None => StatusFilter::All,
        }
    }
}

/// A tracked prayer request as held by the service.
///
/// The client only ever holds transient copies: every mutation is
/// followed by a reload from the service before the view settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerRequest {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "nome_solicitante")]
    pub requester_name: String,
    #[serde(rename = "celular_solicitante", default, skip_serializing_if = "Option::is_none")]
    pub requester_phone: Option<String>,
    #[serde(rename = "email_solicitante", default, skip_serializing_if = "Option::is_none")]
    pub requester_email: Option<String>,
    pub status: Status,
    /// Submission timestamp, kept as the opaque string the service sends.
    #[serde(rename = "data_submissao")]
    pub created_at: String,
    #[serde(rename = "usuario_criador_id")]
    pub creator_user_id: i64,
    /// Append-only comment sequence, oldest first.
    #[serde(rename = "comentarios", default)]
    pub comments: Vec<Comment>,
}

impl PrayerRequest {
    /// Case-insensitive display-filter match over title, description,
    /// and requester name. An empty or blank term matches everything.
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.requester_name.to_lowercase().contains(&term)
    }
}

/// Client-side write shape for creating or fully updating a request.
///
/// `validate` is the fast-fail gate: required fields are checked here,
/// before any network dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDraft {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "nome_solicitante")]
    pub requester_name: String,
    #[serde(rename = "celular_solicitante", default, skip_serializing_if = "Option::is_none")]
    pub requester_phone: Option<String>,
    #[serde(rename = "email_solicitante", default, skip_serializing_if = "Option::is_none")]
    pub requester_email: Option<String>,
}

impl RequestDraft {
    /// Checks that title, description, and requester name are non-blank.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("requester name", &self.requester_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(VigilError::validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}
