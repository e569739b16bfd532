// crates/console-gate-server/src/error.rs
// ============================================================================
// Module: API Error Shaping
// Description: User-facing error taxonomy with fixed messages and statuses.
// Purpose: Reduce every failure to one `{ "error": string }` response shape.
// Dependencies: console-gate-core, axum, serde, thiserror
// ============================================================================

//! ## Overview
//! Each gateway failure maps to exactly one status classification and one
//! fixed user-facing message. Internal detail (transport errors, backend
//! payloads) never crosses this boundary; where a message is the whole
//! payload, the message is all a caller learns.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use console_gate_core::AccessError;
use console_gate_core::DispatchError;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Error Body
// ============================================================================

/// Wire shape shared by every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error string; the entire failure payload.
    pub error: String,
}

// ============================================================================
// SECTION: API Errors
// ============================================================================

/// User-facing gateway failures.
///
/// # Invariants
/// - Each variant maps to exactly one status and one fixed message.
/// - Display strings are safe to return verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carried no namespace parameter.
    #[error("namespace parameter is required")]
    MissingNamespace,
    /// No identity was attached to a namespace-scoped request.
    #[error("authentication required to access namespace activities")]
    AuthenticationRequired,
    /// The caller holds no binding in the requested namespace.
    #[error("access denied: no permission to view activities for namespace '{namespace}'")]
    NamespaceAccessDenied {
        /// Namespace the caller was denied access to.
        namespace: String,
    },
    /// The workgroup directory lookup failed.
    #[error("unable to verify namespace access permissions")]
    AuthorizationUnavailable,
    /// The requested metric type is outside the supported set.
    #[error("invalid metric type: expected one of node, podcpu, podmem")]
    UnsupportedMetricType,
    /// No metrics backend is configured for this deployment.
    #[error("operation not supported")]
    OperationNotSupported,
    /// The metrics backend call failed.
    #[error("unable to query metrics backend")]
    MetricsBackend,
    /// The cluster information backend failed.
    #[error("cluster information unavailable")]
    ClusterUnavailable,
    /// The dashboard links blob is missing or undecodable.
    #[error("cannot load dashboard menu links")]
    InvalidLinksConfig,
    /// The dashboard settings blob is missing or undecodable.
    #[error("cannot load dashboard settings")]
    InvalidSettingsConfig,
}

impl ApiError {
    /// Returns the status classification for the failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingNamespace | Self::UnsupportedMetricType => StatusCode::BAD_REQUEST,
            Self::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            Self::NamespaceAccessDenied {
                ..
            } => StatusCode::FORBIDDEN,
            Self::OperationNotSupported => StatusCode::METHOD_NOT_ALLOWED,
            Self::AuthorizationUnavailable
            | Self::MetricsBackend
            | Self::ClusterUnavailable
            | Self::InvalidLinksConfig
            | Self::InvalidSettingsConfig => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::MissingNamespace => Self::MissingNamespace,
            AccessError::AuthenticationRequired => Self::AuthenticationRequired,
            AccessError::NamespaceAccessDenied {
                namespace,
            } => Self::NamespaceAccessDenied {
                namespace,
            },
            AccessError::AuthorizationUnavailable(_) => Self::AuthorizationUnavailable,
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::UnsupportedMetricType => Self::UnsupportedMetricType,
            DispatchError::OperationNotSupported => Self::OperationNotSupported,
            DispatchError::Backend(_) => Self::MetricsBackend,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests;
