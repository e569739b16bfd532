// crates/console-gate-core/src/metrics.rs
// ============================================================================
// Module: Metrics Dispatch
// Description: Metric-type and interval enumerations plus the query dispatcher.
// Purpose: Validate utilization queries and route them to the metrics backend.
// Dependencies: crate::interfaces, serde, thiserror
// ============================================================================

//! ## Overview
//! Metric types form a closed set with strict parsing; a query naming any
//! other type fails before the backend is touched. Intervals form a closed
//! set with permissive resolution: unknown or absent tokens fall back to the
//! default window instead of erroring. The asymmetry is deliberate — the
//! metric type selects a backend operation while the interval only narrows a
//! time window — and both policies are pinned by tests.
//!
//! ## Invariants
//! - Type validation runs before the provider-configured check, so malformed
//!   requests and "feature disabled" stay distinguishable.
//! - Dispatch calls exactly one provider operation per query and returns the
//!   backend result unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::interfaces::MetricsError;
use crate::interfaces::MetricsProvider;
use crate::interfaces::UtilizationSeries;

// ============================================================================
// SECTION: Metric Types
// ============================================================================

/// Wire tokens accepted as metric types, in stable order.
pub const SUPPORTED_METRIC_TOKENS: [&str; 3] = ["node", "podcpu", "podmem"];

/// Resource class of a utilization query.
///
/// # Invariants
/// - Variants are a closed set; adding one is a compile-time-visible change
///   surfaced by the exhaustive dispatch match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    /// Node CPU utilization.
    Node,
    /// Pod CPU utilization.
    PodCpu,
    /// Pod memory usage.
    PodMem,
}

impl MetricType {
    /// Parses a wire token strictly; any unknown token is rejected.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "node" => Some(Self::Node),
            "podcpu" => Some(Self::PodCpu),
            "podmem" => Some(Self::PodMem),
            _ => None,
        }
    }

    /// Returns the stable lowercase wire token for the metric type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::PodCpu => "podcpu",
            Self::PodMem => "podmem",
        }
    }
}

// ============================================================================
// SECTION: Intervals
// ============================================================================

/// Time-window selector for utilization queries.
///
/// # Invariants
/// - Variants are a closed set; resolution never fails.
/// - Tokens are the variant names as they appear on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricsInterval {
    /// Last five minutes.
    Last5m,
    /// Last fifteen minutes.
    #[default]
    Last15m,
    /// Last thirty minutes.
    Last30m,
    /// Last hour.
    Last60m,
    /// Last three hours.
    Last180m,
}

impl MetricsInterval {
    /// Resolves an interval token permissively.
    ///
    /// Unknown or absent tokens resolve to the default window; the interval
    /// only narrows a time range and carries no security weight, so it is
    /// never a reason to fail a query.
    #[must_use]
    pub fn resolve(token: Option<&str>) -> Self {
        match token {
            Some("Last5m") => Self::Last5m,
            Some("Last15m") => Self::Last15m,
            Some("Last30m") => Self::Last30m,
            Some("Last60m") => Self::Last60m,
            Some("Last180m") => Self::Last180m,
            _ => Self::default(),
        }
    }

    /// Returns the stable wire token for the interval.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Last5m => "Last5m",
            Self::Last15m => "Last15m",
            Self::Last30m => "Last30m",
            Self::Last60m => "Last60m",
            Self::Last180m => "Last180m",
        }
    }

    /// Returns the window length in whole minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        match self {
            Self::Last5m => 5,
            Self::Last15m => 15,
            Self::Last30m => 30,
            Self::Last60m => 60,
            Self::Last180m => 180,
        }
    }
}

// ============================================================================
// SECTION: Dispatch Errors
// ============================================================================

/// Metrics dispatch failures.
///
/// # Invariants
/// - Display strings are the full user-facing payload; no internal detail.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The requested metric type is outside the supported set.
    #[error("invalid metric type: expected one of node, podcpu, podmem")]
    UnsupportedMetricType,
    /// No metrics backend is configured for this deployment.
    #[error("operation not supported")]
    OperationNotSupported,
    /// The backend call failed; provider-specific shapes are normalized away.
    #[error("unable to query metrics backend")]
    Backend(#[source] MetricsError),
}

impl DispatchError {
    /// Returns a stable kind label for audit and metrics sinks.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedMetricType => "unsupported_metric_type",
            Self::OperationNotSupported => "operation_not_supported",
            Self::Backend(_) => "metrics_backend_error",
        }
    }
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Validates utilization queries and routes them to the metrics backend.
///
/// # Invariants
/// - Holds no per-request state; safe to share across concurrent requests.
/// - An absent provider makes every valid query fail with
///   [`DispatchError::OperationNotSupported`].
pub struct MetricsDispatcher {
    /// Metrics backend, when the deployment configures one.
    provider: Option<Arc<dyn MetricsProvider>>,
}

impl MetricsDispatcher {
    /// Creates a dispatcher backed by the optional metrics provider.
    #[must_use]
    pub fn new(provider: Option<Arc<dyn MetricsProvider>>) -> Self {
        Self {
            provider,
        }
    }

    /// Returns true when a metrics backend is configured.
    #[must_use]
    pub const fn provider_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Validates the query and invokes the matching backend operation.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the metric type is unsupported, no
    /// backend is configured, or the backend call fails.
    pub async fn dispatch(
        &self,
        metric_token: &str,
        interval_token: Option<&str>,
    ) -> Result<UtilizationSeries, DispatchError> {
        // Type validation runs first, even when no provider is configured.
        let metric = MetricType::parse(metric_token)
            .ok_or(DispatchError::UnsupportedMetricType)?;
        let Some(provider) = self.provider.as_ref() else {
            return Err(DispatchError::OperationNotSupported);
        };
        let interval = MetricsInterval::resolve(interval_token);
        let result = match metric {
            MetricType::Node => provider.node_cpu(interval).await,
            MetricType::PodCpu => provider.pod_cpu(interval).await,
            MetricType::PodMem => provider.pod_memory(interval).await,
        };
        result.map_err(DispatchError::Backend)
    }
}
