//! The remote board contract: one method per resource operation the
//! service exposes.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Comment, PrayerRequest, RequestDraft, Statistics, Status, StatusFilter, User};

/// The facade over the remote prayer-request service.
///
/// Implementations attach authentication and translate transport
/// failures into [`crate::error::VigilError`]. No operation retries: a
/// failed attempt surfaces immediately, and any retry policy belongs to
/// the caller.
///
/// Mutations do not refresh any local state. Reconciliation — reloading
/// the request list and the statistics aggregate after every successful
/// mutation — is the caller's contract; `vigil-application` folds it
/// into the use-case layer so it cannot be forgotten.
#[async_trait]
pub trait BoardService: Send + Sync {
    /// Fetches all requests visible to the caller, in service order.
    async fn list_requests(&self) -> Result<Vec<PrayerRequest>>;

    /// Fetches one request by id; NotFound when absent.
    async fn get_request(&self, id: i64) -> Result<PrayerRequest>;

    /// Creates a request. The draft is validated client-side before any
    /// dispatch; the service assigns the id and the initial `Pending`
    /// status.
    async fn create_request(&self, draft: &RequestDraft) -> Result<PrayerRequest>;

    /// Full-field update. Only the creator or an admin may succeed;
    /// enforced server-side and surfaced as an Authorization error.
    async fn update_request(&self, id: i64, draft: &RequestDraft) -> Result<PrayerRequest>;

    /// Irreversible delete; same authorization rule as update.
    async fn delete_request(&self, id: i64) -> Result<()>;

    /// Admin-only status transition. Invalid status values are
    /// unrepresentable here; the service still re-validates.
    async fn update_status(&self, id: i64, status: Status) -> Result<PrayerRequest>;

    /// Appends a comment. Content must be non-blank after trimming,
    /// checked client-side before dispatch.
    async fn add_comment(&self, request_id: i64, content: &str) -> Result<Comment>;

    /// The comment sequence for one request, oldest first.
    async fn list_comments(&self, request_id: i64) -> Result<Vec<Comment>>;

    /// Server-computed aggregate counts; always authoritative.
    async fn statistics(&self) -> Result<Statistics>;

    /// Server-authoritative search. Both constraints are optional; a
    /// `StatusFilter::All` contributes no status constraint.
    async fn search(&self, term: Option<&str>, status: StatusFilter) -> Result<Vec<PrayerRequest>>;

    /// All registered users (admin only).
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Flips the target user's admin flag (admin only). Calling twice
    /// restores the prior value.
    async fn toggle_admin(&self, user_id: i64) -> Result<User>;
}
