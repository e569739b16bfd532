// crates/console-gate-providers/src/workgroup.rs
// ============================================================================
// Module: Workgroup Directory Client
// Description: HTTP client for identity-to-workgroup membership resolution.
// Purpose: Implement the WorkgroupDirectory seam against the profiles service.
// Dependencies: console-gate-core, reqwest, serde
// ============================================================================

//! ## Overview
//! The workgroup directory client resolves an authenticated identity to its
//! namespace role bindings and cluster-admin flag with a single lookup
//! against the profiles service. The gate consumes exactly one resolution
//! per decision; this client holds no cache and performs no retries.
//!
//! Security posture: the directory is a trust boundary input; a failed or
//! undecodable lookup surfaces as an error the gate treats as a denial.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use console_gate_core::DirectoryError;
use console_gate_core::Identity;
use console_gate_core::RoleBinding;
use console_gate_core::WorkgroupDirectory;
use console_gate_core::WorkgroupInfo;
use serde::Deserialize;

use crate::transport::Transport;
use crate::transport::TransportError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the workgroup directory client.
///
/// # Invariants
/// - `base_url` points at the profiles service binding endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpWorkgroupDirectoryConfig {
    /// Profiles service base URL.
    pub base_url: String,
    /// Optional bearer token for directory requests.
    pub auth_token: Option<String>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for HttpWorkgroupDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://profiles-kfam.kubeflow:8081".to_string(),
            auth_token: None,
            connect_timeout_ms: 2_000,
            request_timeout_ms: 5_000,
        }
    }
}

// ============================================================================
// SECTION: Wire Shapes
// ============================================================================

/// Directory response payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkgroupPayload {
    /// Whether the identity holds the cluster-admin flag.
    is_cluster_admin: bool,
    /// Namespace role bindings held by the identity.
    #[serde(default)]
    bindings: Vec<RoleBinding>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP-backed workgroup directory.
///
/// # Invariants
/// - One lookup per resolution; no caching and no retries.
pub struct HttpWorkgroupDirectory {
    /// Shared HTTP transport for the profiles service.
    transport: Transport,
}

impl HttpWorkgroupDirectory {
    /// Builds a workgroup directory client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the HTTP client cannot be built.
    pub fn new(config: HttpWorkgroupDirectoryConfig) -> Result<Self, DirectoryError> {
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
}

/// Maps transport failures to directory errors.
fn map_error(error: TransportError) -> DirectoryError {
    match error {
        TransportError::Unavailable(detail) => DirectoryError::Unavailable(detail),
        TransportError::Status(status) => {
            DirectoryError::Unavailable(format!("directory status {status}"))
        }
        TransportError::Invalid(detail) => DirectoryError::Invalid(detail),
    }
}

#[async_trait]
impl WorkgroupDirectory for HttpWorkgroupDirectory {
    async fn resolve(&self, identity: &Identity) -> Result<WorkgroupInfo, DirectoryError> {
        let payload: WorkgroupPayload = self
            .transport
            .get_json("/kfam/v1/bindings", &[("user", identity.subject.as_str())])
            .await
            .map_err(map_error)?;
        Ok(WorkgroupInfo {
            is_cluster_admin: payload.is_cluster_admin,
            namespaces: payload.bindings,
        })
    }
}
