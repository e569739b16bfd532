// crates/console-gate-server/src/error/tests.rs
// ============================================================================
// Module: API Error Tests
// Description: Unit tests for status mapping and failure body shaping.
// Purpose: Pin the one-status-one-message contract for every variant.
// Dependencies: console-gate-server, axum, tokio
// ============================================================================

//! ## Overview
//! Exercises the error taxonomy: status classification per variant, the
//! shared `{ "error": string }` body shape, and the conversions from the
//! core gate and dispatcher errors.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use console_gate_core::AccessError;
use console_gate_core::DirectoryError;
use console_gate_core::DispatchError;
use console_gate_core::MetricsError;

use super::ApiError;
use super::ErrorBody;

// ============================================================================
// SECTION: Status Mapping
// ============================================================================

#[test]
fn each_variant_maps_to_one_status() {
    let cases = [
        (ApiError::MissingNamespace, StatusCode::BAD_REQUEST),
        (ApiError::AuthenticationRequired, StatusCode::UNAUTHORIZED),
        (
            ApiError::NamespaceAccessDenied {
                namespace: "team-a".to_string(),
            },
            StatusCode::FORBIDDEN,
        ),
        (ApiError::AuthorizationUnavailable, StatusCode::INTERNAL_SERVER_ERROR),
        (ApiError::UnsupportedMetricType, StatusCode::BAD_REQUEST),
        (ApiError::OperationNotSupported, StatusCode::METHOD_NOT_ALLOWED),
        (ApiError::MetricsBackend, StatusCode::INTERNAL_SERVER_ERROR),
        (ApiError::ClusterUnavailable, StatusCode::INTERNAL_SERVER_ERROR),
        (ApiError::InvalidLinksConfig, StatusCode::INTERNAL_SERVER_ERROR),
        (ApiError::InvalidSettingsConfig, StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (error, status) in cases {
        assert_eq!(error.status(), status, "status for {error}");
    }
}

#[tokio::test]
async fn failure_body_is_the_shared_error_shape() {
    let response = ApiError::NamespaceAccessDenied {
        namespace: "team-b".to_string(),
    }
    .into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body: ErrorBody = serde_json::from_slice(&bytes).expect("error body");
    assert_eq!(
        body.error,
        "access denied: no permission to view activities for namespace 'team-b'"
    );
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

#[test]
fn gate_errors_convert_without_leaking_detail() {
    let error: ApiError = AccessError::AuthorizationUnavailable(DirectoryError::Unavailable(
        "connection refused to 10.0.0.7".to_string(),
    ))
    .into();
    assert!(matches!(error, ApiError::AuthorizationUnavailable));
    assert_eq!(error.to_string(), "unable to verify namespace access permissions");
}

#[test]
fn dispatch_errors_convert_without_leaking_detail() {
    let error: ApiError =
        DispatchError::Backend(MetricsError::Invalid("stray payload".to_string())).into();
    assert!(matches!(error, ApiError::MetricsBackend));
    assert_eq!(error.to_string(), "unable to query metrics backend");
}

#[test]
fn denied_namespace_is_named_in_the_message() {
    let error: ApiError = AccessError::NamespaceAccessDenied {
        namespace: "team-b".to_string(),
    }
    .into();
    assert!(error.to_string().contains("team-b"));
}
