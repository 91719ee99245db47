//! The reconciled board view.
//!
//! Folds the reload-after-mutation rule into the mutation operations
//! themselves: every successful mutation performs exactly one reload of
//! both the request list and the statistics aggregate before returning,
//! so a caller cannot observe a settled view that drifted from server
//! truth.

use std::sync::Arc;

use vigil_core::board::BoardService;
use vigil_core::error::Result;
use vigil_core::model::{
    Comment, Notification, NotificationBuffer, PrayerRequest, RequestDraft, Statistics, Status,
    StatusFilter,
};

/// Client-held view of the board: the request cache, the authoritative
/// statistics aggregate, and the recent-notification buffer.
///
/// The request list is a cache, never a source of truth. A failed
/// mutation triggers no reload and leaves the view in its last-known-
/// good state; there is nothing to roll back because mutations are
/// never applied optimistically.
///
/// Driven through `&mut self` from a single task — the event-driven,
/// one-operation-at-a-time discipline of the rendering surface.
pub struct BoardUseCase {
    board: Arc<dyn BoardService>,
    requests: Vec<PrayerRequest>,
    statistics: Statistics,
    notifications: NotificationBuffer,
}

impl BoardUseCase {
    pub fn new(board: Arc<dyn BoardService>) -> Self {
        Self {
            board,
            requests: Vec::new(),
            statistics: Statistics::default(),
            notifications: NotificationBuffer::new(),
        }
    }

    /// The cached request list, as of the last reload or search.
    pub fn requests(&self) -> &[PrayerRequest] {
        &self.requests
    }

    /// The last server-computed aggregate.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Recent notifications, newest first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Reloads the request list and the statistics aggregate.
    ///
    /// Both fetches must succeed before either side of the view is
    /// replaced, so an error never leaves the two halves mismatched.
    pub async fn refresh(&mut self) -> Result<()> {
        let requests = self.board.list_requests().await?;
        let statistics = self.board.statistics().await?;
        tracing::debug!(
            "[BoardUseCase] Refreshed view: {} requests, {} total on server",
            requests.len(),
            statistics.total
        );
        self.requests = requests;
        self.statistics = statistics;
        Ok(())
    }

    /// Creates a request, reloads the view, and records a notification.
    pub async fn create_request(&mut self, draft: &RequestDraft) -> Result<PrayerRequest> {
        let created = self.board.create_request(draft).await?;
        self.refresh().await?;
        self.notifications
            .push(format!("Request \"{}\" created", created.title));
        Ok(created)
    }

    /// Fully updates a request, then reloads the view.
    pub async fn update_request(&mut self, id: i64, draft: &RequestDraft) -> Result<PrayerRequest> {
        let updated = self.board.update_request(id, draft).await?;
        self.refresh().await?;
        self.notifications
            .push(format!("Request \"{}\" updated", updated.title));
        Ok(updated)
    }

    /// Deletes a request, then reloads the view.
    pub async fn delete_request(&mut self, id: i64) -> Result<()> {
        self.board.delete_request(id).await?;
        self.refresh().await?;
        self.notifications.push("Request deleted");
        Ok(())
    }

    /// Changes a request's status (admin only), then reloads the view.
    pub async fn set_status(&mut self, id: i64, status: Status) -> Result<PrayerRequest> {
        let updated = self.board.update_status(id, status).await?;
        self.refresh().await?;
        self.notifications
            .push(format!("Status changed to \"{}\"", updated.status));
        Ok(updated)
    }

    /// Appends a comment, then reloads the view.
    pub async fn add_comment(&mut self, request_id: i64, content: &str) -> Result<Comment> {
        let comment = self.board.add_comment(request_id, content).await?;
        self.refresh().await?;
        self.notifications.push("Comment added");
        Ok(comment)
    }

    /// Server-authoritative search: replaces the cached list with the
    /// service's result set.
    ///
    /// Statistics are deliberately left alone — the aggregate always
    /// describes the whole board, not the current result set, so the
    /// two may diverge until the next `refresh`.
    pub async fn search(&mut self, term: Option<&str>, status: StatusFilter) -> Result<()> {
        self.requests = self.board.search(term, status).await?;
        Ok(())
    }

    /// Local display filter over the cached list.
    ///
    /// Independent of [`BoardUseCase::search`]: this never talks to the
    /// service and never replaces the cache. The rendering surface uses
    /// it for as-you-type narrowing of whatever list is on screen.
    pub fn visible_requests(&self, term: &str, status: StatusFilter) -> Vec<&PrayerRequest> {
        self.requests
            .iter()
            .filter(|request| status.matches(request.status))
            .filter(|request| request.matches_term(term))
            .collect()
    }

    /// Empties the view. For logout: the next user must not see the
    /// previous user's data.
    pub fn clear(&mut self) {
        self.requests.clear();
        self.statistics = Statistics::default();
    }
}
