// crates/console-gate-providers/src/cluster.rs
// ============================================================================
// Module: Cluster Information Client
// Description: HTTP client for namespace, event, and configuration lookups.
// Purpose: Implement the ClusterInfoProvider seam against the cluster API.
// Dependencies: console-gate-core, reqwest, serde, time
// ============================================================================

//! ## Overview
//! The cluster information client talks to the cluster API (or an
//! aggregating proxy in front of it) to list namespaces, list
//! namespace-scoped events, and fetch the dashboard configuration map. List
//! payloads follow the cluster API wire shape (`items` with `metadata`);
//! this client flattens them into the core types.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use console_gate_core::ClusterInfoError;
use console_gate_core::ClusterInfoProvider;
use console_gate_core::DashboardConfig;
use console_gate_core::Event;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::transport::Transport;
use crate::transport::TransportError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the cluster information client.
///
/// # Invariants
/// - `base_url` points at the cluster API server or an equivalent proxy.
/// - The configuration map is read from one fixed namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpClusterInfoConfig {
    /// Cluster API base URL.
    pub base_url: String,
    /// Optional bearer token for cluster API requests.
    pub auth_token: Option<String>,
    /// Namespace holding the dashboard configuration map.
    pub configmap_namespace: String,
    /// Name of the dashboard configuration map.
    pub configmap_name: String,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for HttpClusterInfoConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8001".to_string(),
            auth_token: None,
            configmap_namespace: "kubeflow".to_string(),
            configmap_name: "dashboard-config".to_string(),
            connect_timeout_ms: 2_000,
            request_timeout_ms: 5_000,
        }
    }
}

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// Cluster API object metadata subset.
#[derive(Debug, Deserialize)]
struct ObjectMeta {
    /// Object name.
    name: String,
}

/// One entry in a cluster API namespace list.
#[derive(Debug, Deserialize)]
struct NamespaceItem {
    /// Namespace metadata.
    metadata: ObjectMeta,
}

/// Cluster API namespace list payload.
#[derive(Debug, Deserialize)]
struct NamespaceList {
    /// Listed namespaces.
    #[serde(default)]
    items: Vec<NamespaceItem>,
}

/// Object reference carried by a cluster event.
#[derive(Debug, Deserialize)]
struct InvolvedObject {
    /// Name of the referenced object.
    name: String,
}

/// One entry in a cluster API event list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventItem {
    /// Event timestamp when the backend supplies one.
    #[serde(default, with = "time::serde::rfc3339::option")]
    last_timestamp: Option<OffsetDateTime>,
    /// Event classification.
    #[serde(rename = "type")]
    kind: String,
    /// Machine-readable reason label.
    reason: String,
    /// Human-readable event message.
    message: String,
    /// Object the event refers to.
    involved_object: InvolvedObject,
}

/// Cluster API event list payload.
#[derive(Debug, Deserialize)]
struct EventList {
    /// Listed events.
    #[serde(default)]
    items: Vec<EventItem>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP-backed cluster information provider.
///
/// # Invariants
/// - One backend call per operation; no caching and no retries.
pub struct HttpClusterInfo {
    /// Shared HTTP transport for the cluster API.
    transport: Transport,
    /// Namespace holding the dashboard configuration map.
    configmap_namespace: String,
    /// Name of the dashboard configuration map.
    configmap_name: String,
}

impl HttpClusterInfo {
    /// Builds a cluster information client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterInfoError`] when the HTTP client cannot be built.
    pub fn new(config: HttpClusterInfoConfig) -> Result<Self, ClusterInfoError> {
        let transport = Transport::new(
            config.base_url,
            config.auth_token,
            Duration::from_millis(config.connect_timeout_ms),
            Duration::from_millis(config.request_timeout_ms),
        )
        .map_err(map_error)?;
        Ok(Self {
            transport,
            configmap_namespace: config.configmap_namespace,
            configmap_name: config.configmap_name,
        })
    }
}

/// Maps transport failures to cluster information errors.
fn map_error(error: TransportError) -> ClusterInfoError {
    match error {
        TransportError::Unavailable(detail) => ClusterInfoError::Unavailable(detail),
        TransportError::Status(status) => {
            ClusterInfoError::Unavailable(format!("cluster api status {status}"))
        }
        TransportError::Invalid(detail) => ClusterInfoError::Invalid(detail),
    }
}

#[async_trait]
impl ClusterInfoProvider for HttpClusterInfo {
    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterInfoError> {
        let list: NamespaceList =
            self.transport.get_json("/api/v1/namespaces", &[]).await.map_err(map_error)?;
        Ok(list.items.into_iter().map(|item| item.metadata.name).collect())
    }

    async fn list_events(&self, namespace: &str) -> Result<Vec<Event>, ClusterInfoError> {
        let path = format!("/api/v1/namespaces/{namespace}/events");
        let list: EventList =
            self.transport.get_json(&path, &[]).await.map_err(map_error)?;
        Ok(list
            .items
            .into_iter()
            .map(|item| Event {
                timestamp: item.last_timestamp,
                kind: item.kind,
                reason: item.reason,
                message: item.message,
                involved_object: item.involved_object.name,
            })
            .collect())
    }

    async fn dashboard_config(&self) -> Result<DashboardConfig, ClusterInfoError> {
        let path = format!(
            "/api/v1/namespaces/{}/configmaps/{}",
            self.configmap_namespace, self.configmap_name
        );
        self.transport.get_json(&path, &[]).await.map_err(map_error)
    }
}
