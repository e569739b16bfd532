// crates/console-gate-server/src/telemetry/tests.rs
// ============================================================================
// Module: Gateway Telemetry Tests
// Description: Unit tests for operation classification and label stability.
// Purpose: Pin the metric labels downstream sinks aggregate on.
// Dependencies: console-gate-server
// ============================================================================

//! ## Overview
//! Exercises path classification and the stable string labels attached to
//! metric events.

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

use super::GatewayOperation;
use super::GatewayOutcome;

// ============================================================================
// SECTION: Classification
// ============================================================================

#[test]
fn request_paths_classify_to_operations() {
    let cases = [
        ("/api/metrics/node", GatewayOperation::Metrics),
        ("/api/namespaces", GatewayOperation::Namespaces),
        ("/api/activities/team-a", GatewayOperation::Activities),
        ("/api/dashboard-links", GatewayOperation::DashboardLinks),
        ("/api/dashboard-settings", GatewayOperation::DashboardSettings),
        ("/api/env-info", GatewayOperation::EnvInfo),
        ("/healthz", GatewayOperation::Health),
        ("/api/unknown", GatewayOperation::Other),
        ("/", GatewayOperation::Other),
    ];
    for (path, operation) in cases {
        assert_eq!(GatewayOperation::classify(path), operation, "classify {path}");
    }
}

// ============================================================================
// SECTION: Labels
// ============================================================================

#[test]
fn operation_labels_are_stable() {
    assert_eq!(GatewayOperation::Metrics.as_str(), "metrics");
    assert_eq!(GatewayOperation::Activities.as_str(), "activities");
    assert_eq!(GatewayOperation::DashboardLinks.as_str(), "dashboard_links");
    assert_eq!(GatewayOperation::Other.as_str(), "other");
}

#[test]
fn outcome_labels_are_stable() {
    assert_eq!(GatewayOutcome::Ok.as_str(), "ok");
    assert_eq!(GatewayOutcome::Error.as_str(), "error");
}
