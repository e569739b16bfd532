// crates/console-gate-server/src/telemetry.rs
// ============================================================================
// Module: Gateway Telemetry
// Description: Observability hooks for gateway requests and gate decisions.
// Purpose: Provide metric and audit seams without hard dependencies.
// Dependencies: none
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for gateway request counters
//! and latency observations, plus an audit seam for authorization decisions.
//! It is intentionally dependency-light so deployments can plug in
//! Prometheus or OpenTelemetry without redesign.
//!
//! Security posture: audit records carry the decision reason and denied
//! namespace only; a caller's full binding list never reaches a sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Gateway operation classification for metric labels.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GatewayOperation {
    /// Utilization query by metric type.
    Metrics,
    /// Namespace listing.
    Namespaces,
    /// Namespace-scoped event listing.
    Activities,
    /// Dashboard menu link configuration.
    DashboardLinks,
    /// Dashboard settings configuration.
    DashboardSettings,
    /// Environment information for the UI shell.
    EnvInfo,
    /// Liveness probe.
    Health,
    /// Unrecognized path.
    Other,
}

impl GatewayOperation {
    /// Returns a stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metrics => "metrics",
            Self::Namespaces => "namespaces",
            Self::Activities => "activities",
            Self::DashboardLinks => "dashboard_links",
            Self::DashboardSettings => "dashboard_settings",
            Self::EnvInfo => "env_info",
            Self::Health => "health",
            Self::Other => "other",
        }
    }

    /// Classifies a request path into an operation label.
    #[must_use]
    pub fn classify(path: &str) -> Self {
        if path.starts_with("/api/metrics/") {
            Self::Metrics
        } else if path == "/api/namespaces" {
            Self::Namespaces
        } else if path.starts_with("/api/activities") {
            Self::Activities
        } else if path == "/api/dashboard-links" {
            Self::DashboardLinks
        } else if path == "/api/dashboard-settings" {
            Self::DashboardSettings
        } else if path == "/api/env-info" {
            Self::EnvInfo
        } else if path == "/healthz" {
            Self::Health
        } else {
            Self::Other
        }
    }
}

/// Gateway request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GatewayOutcome {
    /// Successful request.
    Ok,
    /// Failed request.
    Error,
}

impl GatewayOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// Gateway request metric event payload.
#[derive(Debug, Clone)]
pub struct RequestMetricEvent {
    /// Operation handling the request.
    pub operation: GatewayOperation,
    /// Request outcome.
    pub outcome: GatewayOutcome,
    /// Response status code.
    pub status: u16,
}

// ============================================================================
// SECTION: Metrics Seam
// ============================================================================

/// Metrics sink for gateway requests and latencies.
pub trait GatewayMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: RequestMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: RequestMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopGatewayMetrics;

impl GatewayMetrics for NoopGatewayMetrics {
    fn record_request(&self, _event: RequestMetricEvent) {}

    fn record_latency(&self, _event: RequestMetricEvent, _latency: Duration) {}
}

// ============================================================================
// SECTION: Audit Seam
// ============================================================================

/// One authorization decision, as recorded for audit.
///
/// # Invariants
/// - `detail` holds internal failure context for local sinks only; it is
///   never part of a response body.
#[derive(Debug, Clone)]
pub struct GateAuditRecord {
    /// Caller subject when an identity was attached.
    pub subject: Option<String>,
    /// Namespace the decision was made for, when present on the request.
    pub namespace: Option<String>,
    /// Whether access was admitted.
    pub allowed: bool,
    /// Stable reason label (admission reason or denial kind).
    pub reason: &'static str,
    /// Internal failure detail, present on unavailable-directory denials.
    pub detail: Option<String>,
}

/// Audit sink for authorization decisions.
pub trait GateAuditSink: Send + Sync {
    /// Records one authorization decision.
    fn record(&self, record: &GateAuditRecord);
}

/// No-op audit sink.
///
/// # Invariants
/// - Records are intentionally discarded.
pub struct NoopGateAuditSink;

impl GateAuditSink for NoopGateAuditSink {
    fn record(&self, _record: &GateAuditRecord) {}
}

#[cfg(test)]
mod tests;
