// crates/console-gate-providers/src/transport.rs
// ============================================================================
// Module: Client Transport
// Description: Shared HTTP plumbing for the collaborator clients.
// Purpose: Centralize base-URL normalization, bearer headers, and GET decoding.
// Dependencies: reqwest, serde
// ============================================================================

//! ## Overview
//! One transport value backs each collaborator client: a reqwest client with
//! connect and request timeouts, a normalized base URL, and an optional
//! bearer token. Requests are single-shot GETs; non-success statuses surface
//! as typed transport errors for the owning client to classify.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Transport-level failures shared by the collaborator clients.
///
/// # Invariants
/// - `Status` carries the backend status for the owning client to classify.
/// - Detail strings are for local audit only; callers never see them.
#[derive(Debug)]
pub(crate) enum TransportError {
    /// The backend could not be reached or the client could not be built.
    Unavailable(String),
    /// The backend answered with a non-success status.
    Status(StatusCode),
    /// The backend answered with an undecodable payload.
    Invalid(String),
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Shared HTTP transport for a single collaborator backend.
///
/// # Invariants
/// - `base_url` is normalized without a trailing slash.
/// - Timeouts apply to every request issued through the transport.
pub(crate) struct Transport {
    /// Backend base URL (no trailing slash).
    base_url: String,
    /// Optional bearer token attached to every request.
    auth_token: Option<String>,
    /// HTTP client configured with timeouts.
    client: Client,
}

impl Transport {
    /// Builds a transport for the given backend.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unavailable`] when the HTTP client cannot
    /// be built or the bearer token is not a valid header value.
    pub(crate) fn new(
        mut base_url: String,
        auth_token: Option<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|err| TransportError::Unavailable(err.to_string()))?;
        if let Some(token) = &auth_token {
            // Reject unusable tokens at construction, not per request.
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| TransportError::Unavailable("invalid auth token".to_string()))?;
        }
        let trimmed_len = base_url.trim_end_matches('/').len();
        base_url.truncate(trimmed_len);
        Ok(Self {
            base_url,
            auth_token,
            client,
        })
    }

    /// Builds the request headers for one backend call.
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.auth_token {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                headers.insert(reqwest::header::AUTHORIZATION, value);
            }
        }
        headers
    }

    /// Issues a GET against `path` and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on connection failures, non-success
    /// statuses, and undecodable payloads.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(url)
            .headers(self.build_headers())
            .query(query)
            .send()
            .await
            .map_err(|err| TransportError::Unavailable(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }
        response.json::<T>().await.map_err(|err| TransportError::Invalid(err.to_string()))
    }
}
