//! Session lifecycle: login, registration, token verification, logout.

use std::sync::{Arc, RwLock};

use reqwest::Client;
use serde::Deserialize;

use vigil_core::error::Result;
use vigil_core::model::{RegisterProfile, User};
use vigil_core::session::{SessionSnapshot, SessionStore};
use vigil_infrastructure::{ClientConfig, JsonSessionStore};

use crate::http;

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct VerifyResponse {
    user: User,
}

/// Owns the authentication credential and exposes authentication state.
///
/// The in-memory snapshot backs `is_authenticated` and the bearer
/// header on every outgoing request; it is written only by `login`,
/// `logout`, and a failed `verify_token`. Durable persistence goes
/// through the injected [`SessionStore`], so the token survives process
/// restarts until an explicit logout or a rejected verification.
///
/// The lock around the snapshot is never held across an await.
pub struct SessionClient {
    http: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    session: RwLock<Option<SessionSnapshot>>,
}

impl SessionClient {
    /// Creates a client against `base_url`, restoring any snapshot the
    /// store already holds. No network traffic happens here; use
    /// [`SessionClient::restore`] to verify a restored token.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> Result<Self> {
        let restored = store.load()?;
        if restored.is_some() {
            tracing::debug!("[SessionClient] Restored persisted session snapshot");
        }
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self {
            http: Client::new(),
            base_url,
            store,
            session: RwLock::new(restored),
        })
    }

    /// Builds a client from `config.toml` and the default session file.
    pub fn from_default_storage() -> Result<Self> {
        let config = ClientConfig::load();
        let store = JsonSessionStore::new()?;
        Self::new(config.api_url, Arc::new(store))
    }

    /// Base URL of the remote service, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The bearer token currently held in memory, if any.
    pub fn token(&self) -> Option<String> {
        self.snapshot().map(|s| s.token)
    }

    /// True iff a token is currently held in memory.
    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Last-persisted user snapshot, without a network call.
    ///
    /// For optimistic display only — never an authorization decision.
    pub fn current_user(&self) -> Option<User> {
        self.snapshot().map(|s| s.user)
    }

    /// Exchanges credentials for a token and persists the snapshot.
    ///
    /// On any failure nothing is persisted and the previous state is
    /// left untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(http::connectivity_error)?;

        if !response.status().is_success() {
            return Err(http::response_error(response).await);
        }

        let body: LoginResponse = http::parse_json(response).await?;
        let snapshot = SessionSnapshot {
            token: body.token,
            user: body.user.clone(),
        };
        self.store.save(&snapshot)?;
        self.set_snapshot(Some(snapshot));
        tracing::info!("[SessionClient] Logged in as {}", body.user.username);
        Ok(body.user)
    }

    /// Forwards profile fields to the registration endpoint.
    ///
    /// Does not establish a session — a subsequent explicit login is
    /// required. A rejected profile surfaces as a Validation error.
    pub async fn register(&self, profile: &RegisterProfile) -> Result<()> {
        let url = format!("{}/auth/register", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(profile)
            .send()
            .await
            .map_err(http::connectivity_error)?;

        if !response.status().is_success() {
            return Err(http::response_error(response).await);
        }

        tracing::info!("[SessionClient] Registered user {}", profile.username);
        Ok(())
    }

    /// Verifies the held token with the service.
    ///
    /// On failure the session is cleared — an implicit logout — and the
    /// original error is re-raised so the caller can fall back to the
    /// unauthenticated view.
    pub async fn verify_token(&self) -> Result<User> {
        match self.verify_inner().await {
            Ok(user) => Ok(user),
            Err(err) => {
                tracing::info!("[SessionClient] Token rejected, clearing session: {}", err);
                if let Err(cleanup) = self.logout() {
                    tracing::warn!(
                        "[SessionClient] Failed to clear session after rejected token: {}",
                        cleanup
                    );
                }
                Err(err)
            }
        }
    }

    async fn verify_inner(&self) -> Result<User> {
        let url = format!("{}/auth/verify-token", self.base_url);
        let token = self.token();
        let request = http::with_bearer(self.http.get(&url), token.as_deref());
        let response = request.send().await.map_err(http::connectivity_error)?;

        if !response.status().is_success() {
            return Err(http::response_error(response).await);
        }

        let body: VerifyResponse = http::parse_json(response).await?;
        Ok(body.user)
    }

    /// Process-start entry point: verifies a persisted token, if any.
    ///
    /// `Ok(None)` means no session was persisted; an error means the
    /// persisted token was rejected and has been cleared.
    pub async fn restore(&self) -> Result<Option<User>> {
        if !self.is_authenticated() {
            return Ok(None);
        }
        self.verify_token().await.map(Some)
    }

    /// Clears the in-memory token and erases all persisted session data.
    ///
    /// Pure local operation — no network call. Calling it with no
    /// active session leaves state unchanged.
    pub fn logout(&self) -> Result<()> {
        self.set_snapshot(None);
        self.store.clear()
    }

    fn snapshot(&self) -> Option<SessionSnapshot> {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_snapshot(&self, value: Option<SessionSnapshot>) {
        match self.session.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
