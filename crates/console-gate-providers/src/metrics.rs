// crates/console-gate-providers/src/metrics.rs
// ============================================================================
// Module: Metrics Backend Client
// Description: HTTP client for time-windowed utilization queries.
// Purpose: Implement the MetricsProvider seam against the metrics service.
// Dependencies: console-gate-core, reqwest, serde
// ============================================================================

//! ## Overview
//! The metrics backend client issues one utilization query per dispatcher
//! call. The resolved interval travels as a whole-minutes window parameter;
//! the response body is the utilization series, passed through to callers
//! unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use console_gate_core::MetricType;
use console_gate_core::MetricsError;
use console_gate_core::MetricsInterval;
use console_gate_core::MetricsProvider;
use console_gate_core::UtilizationSeries;
use serde::Deserialize;

use crate::transport::Transport;
use crate::transport::TransportError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the metrics backend client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpMetricsBackendConfig {
    /// Metrics service base URL.
    pub base_url: String,
    /// Optional bearer token for metrics requests.
    pub auth_token: Option<String>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for HttpMetricsBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://metrics.kube-system:9090".to_string(),
            auth_token: None,
            connect_timeout_ms: 2_000,
            request_timeout_ms: 10_000,
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP-backed metrics provider.
///
/// # Invariants
/// - One query per operation; the series is returned unchanged.
pub struct HttpMetricsBackend {
    /// Shared HTTP transport for the metrics service.
    transport: Transport,
}

impl HttpMetricsBackend {
    /// Builds a metrics backend client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError`] when the HTTP client cannot be built.
    pub fn new(config: HttpMetricsBackendConfig) -> Result<Self, MetricsError> {
        let transport = Transport::new(
            config.base_url,
            config.auth_token,
            Duration::from_millis(config.connect_timeout_ms),
            Duration::from_millis(config.request_timeout_ms),
        )
        .map_err(map_error)?;
        Ok(Self {
            transport,
        })
    }

    /// Issues one utilization query for the metric over the interval.
    async fn query(
        &self,
        metric: MetricType,
        interval: MetricsInterval,
    ) -> Result<UtilizationSeries, MetricsError> {
        let path = format!("/v1/query/{}", metric.as_str());
        let minutes = interval.minutes().to_string();
        self.transport
            .get_json(&path, &[("minutes", minutes.as_str())])
            .await
            .map_err(map_error)
    }
}

/// Maps transport failures to metrics errors.
fn map_error(error: TransportError) -> MetricsError {
    match error {
        TransportError::Unavailable(detail) => MetricsError::Unavailable(detail),
        TransportError::Status(status) => {
            MetricsError::Unavailable(format!("metrics status {status}"))
        }
        TransportError::Invalid(detail) => MetricsError::Invalid(detail),
    }
}

#[async_trait]
impl MetricsProvider for HttpMetricsBackend {
    async fn node_cpu(
        &self,
        interval: MetricsInterval,
    ) -> Result<UtilizationSeries, MetricsError> {
        self.query(MetricType::Node, interval).await
    }

    async fn pod_cpu(
        &self,
        interval: MetricsInterval,
    ) -> Result<UtilizationSeries, MetricsError> {
        self.query(MetricType::PodCpu, interval).await
    }

    async fn pod_memory(
        &self,
        interval: MetricsInterval,
    ) -> Result<UtilizationSeries, MetricsError> {
        self.query(MetricType::PodMem, interval).await
    }
}
