// crates/console-gate-core/src/interfaces.rs
// ============================================================================
// Module: Collaborator Interfaces
// Description: Backend-agnostic seams for cluster info, directory, and metrics.
// Purpose: Define the contract surfaces the gateway composes at request time.
// Dependencies: crate::identity, crate::metrics, serde, async-trait, time
// ============================================================================

//! ## Overview
//! Interfaces define how the gateway reaches its external collaborators
//! without embedding backend specifics. Implementations must be side-effect
//! free beyond the single call they serve, must not retry internally, and
//! must fail closed on invalid data. One call is one suspension point; the
//! core issues at most one collaborator call per decision.
//!
//! Security posture: collaborator responses are untrusted input and are
//! validated at deserialization; errors surface as opaque strings that the
//! boundary layer never forwards verbatim to callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;

use crate::identity::Identity;
use crate::identity::WorkgroupInfo;
use crate::metrics::MetricsInterval;

// ============================================================================
// SECTION: Cluster Information
// ============================================================================

/// Namespace-scoped cluster event row.
///
/// # Invariants
/// - Fields pass through from the cluster backend unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event timestamp when the backend supplies one.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    /// Event classification (for example `Normal` or `Warning`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Machine-readable reason label.
    pub reason: String,
    /// Human-readable event message.
    pub message: String,
    /// Name of the object the event refers to.
    pub involved_object: String,
}

/// Dashboard configuration map retrieved from the cluster.
///
/// # Invariants
/// - `data` values under the `links` and `settings` keys hold JSON-encoded
///   blobs; this type does not decode them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Raw key-value configuration entries.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

/// Cluster information failures.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum ClusterInfoError {
    /// The cluster backend could not be reached or answered abnormally.
    #[error("cluster information unavailable: {0}")]
    Unavailable(String),
    /// The cluster backend answered with an undecodable payload.
    #[error("cluster information response invalid: {0}")]
    Invalid(String),
}

/// Cluster information provider consumed by the gateway.
#[async_trait]
pub trait ClusterInfoProvider: Send + Sync {
    /// Lists the namespaces known to the cluster.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterInfoError`] when the listing cannot be fetched.
    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterInfoError>;

    /// Lists recent events scoped to the given namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterInfoError`] when the listing cannot be fetched.
    async fn list_events(&self, namespace: &str) -> Result<Vec<Event>, ClusterInfoError>;

    /// Retrieves the dashboard configuration map.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterInfoError`] when the map cannot be fetched.
    async fn dashboard_config(&self) -> Result<DashboardConfig, ClusterInfoError>;
}

// ============================================================================
// SECTION: Workgroup Directory
// ============================================================================

/// Workgroup directory failures.
///
/// # Invariants
/// - Variants are stable for error classification.
/// - A failed lookup is never interpreted as an allow by callers.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory could not be reached or answered abnormally.
    #[error("workgroup directory unavailable: {0}")]
    Unavailable(String),
    /// The directory answered with an undecodable payload.
    #[error("workgroup directory response invalid: {0}")]
    Invalid(String),
}

/// Resolves an authenticated identity to its workgroup membership.
#[async_trait]
pub trait WorkgroupDirectory: Send + Sync {
    /// Resolves the identity to its role bindings and cluster-admin flag.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the membership cannot be resolved.
    async fn resolve(&self, identity: &Identity) -> Result<WorkgroupInfo, DirectoryError>;
}

// ============================================================================
// SECTION: Metrics Backend
// ============================================================================

/// Single sample in a utilization series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationPoint {
    /// Sample time in unix epoch milliseconds.
    pub timestamp: i64,
    /// Optional sample label (node name, pod name).
    #[serde(default)]
    pub label: Option<String>,
    /// Utilization value; unit depends on the queried metric.
    pub value: f64,
}

/// Utilization series returned by the metrics backend.
///
/// # Invariants
/// - Passed through to callers unchanged; the core never resamples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSeries {
    /// Samples in backend order.
    pub points: Vec<UtilizationPoint>,
}

/// Metrics backend failures.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The metrics backend could not be reached or answered abnormally.
    #[error("metrics backend unavailable: {0}")]
    Unavailable(String),
    /// The metrics backend answered with an undecodable payload.
    #[error("metrics backend response invalid: {0}")]
    Invalid(String),
}

/// Metrics backend consumed by the dispatcher, one operation per metric type.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Returns node CPU utilization over the interval.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError`] when the series cannot be fetched.
    async fn node_cpu(&self, interval: MetricsInterval)
    -> Result<UtilizationSeries, MetricsError>;

    /// Returns pod CPU utilization over the interval.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError`] when the series cannot be fetched.
    async fn pod_cpu(&self, interval: MetricsInterval)
    -> Result<UtilizationSeries, MetricsError>;

    /// Returns pod memory usage over the interval.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError`] when the series cannot be fetched.
    async fn pod_memory(
        &self,
        interval: MetricsInterval,
    ) -> Result<UtilizationSeries, MetricsError>;
}

#[cfg(test)]
mod tests;
