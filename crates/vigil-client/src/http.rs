//! Shared HTTP plumbing: bearer attachment and error mapping.
//!
//! Every call sends JSON. Non-2xx responses carry an
//! `{"error": "..."}` envelope; its message becomes the user-facing
//! error text, with the raw body (or a generic message) as fallback.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use vigil_core::error::VigilError;

/// Error envelope returned by the service on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Fallback message when the error body is missing or unreadable.
const GENERIC_FAILURE: &str = "request failed";

/// Attaches the bearer token, when one is held.
pub(crate) fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header("Authorization", format!("Bearer {token}")),
        None => request,
    }
}

/// Converts a transport-level failure (no response) into the taxonomy.
pub(crate) fn connectivity_error(err: reqwest::Error) -> VigilError {
    VigilError::connectivity(format!("no response from service: {err}"))
}

/// Converts a non-2xx response into the taxonomy, consuming the body.
pub(crate) async fn response_error(response: Response) -> VigilError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "failed to read error body".to_string());
    map_http_error(status, &body)
}

/// Maps a status code and raw error body onto an error variant.
pub(crate) fn map_http_error(status: StatusCode, body: &str) -> VigilError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|envelope| envelope.error)
        .unwrap_or_else(|_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                trimmed.to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED => VigilError::authentication(message),
        StatusCode::FORBIDDEN => VigilError::authorization(message),
        StatusCode::NOT_FOUND => VigilError::not_found(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            VigilError::validation(message)
        }
        _ => VigilError::server(status.as_u16(), message),
    }
}

/// Deserializes a success body.
pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, VigilError> {
    response
        .json::<T>()
        .await
        .map_err(|err| VigilError::internal(format!("failed to parse service response: {err}")))
}
