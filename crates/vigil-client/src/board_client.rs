//! HTTP implementation of the board contract.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;

use vigil_core::board::BoardService;
use vigil_core::error::{Result, VigilError};
use vigil_core::model::{
    Comment, PrayerRequest, RequestDraft, Statistics, Status, StatusFilter, User,
};

use crate::http;
use crate::session_client::SessionClient;

#[derive(Serialize)]
struct StatusBody {
    status: Status,
}

#[derive(Serialize)]
struct CommentBody {
    #[serde(rename = "conteudo")]
    content: String,
}

/// [`BoardService`] over the remote HTTP API.
///
/// Stateless apart from the session reference: the bearer token is read
/// from the [`SessionClient`] immediately before every request, so a
/// login or logout is picked up without rebuilding the facade.
pub struct HttpBoardService {
    http: Client,
    base_url: String,
    session: Arc<SessionClient>,
}

impl HttpBoardService {
    /// Creates a facade sharing the session's service endpoint.
    pub fn new(session: Arc<SessionClient>) -> Self {
        Self {
            http: Client::new(),
            base_url: session.base_url().to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.session.token();
        http::with_bearer(request, token.as_deref())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(http::connectivity_error)?;
        if !response.status().is_success() {
            return Err(http::response_error(response).await);
        }
        Ok(response)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.authed(self.http.get(self.url(path)));
        let response = self.send(request).await?;
        http::parse_json(response).await
    }
}

#[async_trait]
impl BoardService for HttpBoardService {
    async fn list_requests(&self) -> Result<Vec<PrayerRequest>> {
        self.fetch("/pedidos").await
    }

    async fn get_request(&self, id: i64) -> Result<PrayerRequest> {
        self.fetch(&format!("/pedidos/{id}")).await
    }

    async fn create_request(&self, draft: &RequestDraft) -> Result<PrayerRequest> {
        // Fast-fail: reject an incomplete draft before any dispatch.
        draft.validate()?;
        let request = self.authed(self.http.post(self.url("/pedidos")).json(draft));
        let response = self.send(request).await?;
        http::parse_json(response).await
    }

    async fn update_request(&self, id: i64, draft: &RequestDraft) -> Result<PrayerRequest> {
        draft.validate()?;
        let request = self.authed(self.http.put(self.url(&format!("/pedidos/{id}"))).json(draft));
        let response = self.send(request).await?;
        http::parse_json(response).await
    }

    async fn delete_request(&self, id: i64) -> Result<()> {
        let request = self.authed(self.http.delete(self.url(&format!("/pedidos/{id}"))));
        self.send(request).await?;
        Ok(())
    }

    async fn update_status(&self, id: i64, status: Status) -> Result<PrayerRequest> {
        let request = self.authed(
            self.http
                .put(self.url(&format!("/pedidos/{id}/status")))
                .json(&StatusBody { status }),
        );
        let response = self.send(request).await?;
        http::parse_json(response).await
    }

    async fn add_comment(&self, request_id: i64, content: &str) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(VigilError::validation("comment content must not be empty"));
        }
        let request = self.authed(
            self.http
                .post(self.url(&format!("/pedidos/{request_id}/comentarios")))
                .json(&CommentBody {
                    content: content.to_string(),
                }),
        );
        let response = self.send(request).await?;
        http::parse_json(response).await
    }

    async fn list_comments(&self, request_id: i64) -> Result<Vec<Comment>> {
        self.fetch(&format!("/pedidos/{request_id}/comentarios")).await
    }

    async fn statistics(&self) -> Result<Statistics> {
        self.fetch("/pedidos/estatisticas").await
    }

    async fn search(&self, term: Option<&str>, status: StatusFilter) -> Result<Vec<PrayerRequest>> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(term) = term {
            if !term.trim().is_empty() {
                query.push(("q", term));
            }
        }
        if let Some(value) = status.query_value() {
            query.push(("status", value));
        }

        let request = self.authed(self.http.get(self.url("/pedidos/buscar")).query(&query));
        let response = self.send(request).await?;
        http::parse_json(response).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.fetch("/auth/users").await
    }

    async fn toggle_admin(&self, user_id: i64) -> Result<User> {
        let request = self.authed(self.http.put(self.url(&format!("/auth/users/{user_id}/admin"))));
        let response = self.send(request).await?;
        http::parse_json(response).await
    }
}
