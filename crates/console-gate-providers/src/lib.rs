// crates/console-gate-providers/src/lib.rs
// ============================================================================
// Module: Console Gate Providers
// Description: HTTP-backed collaborator clients for the dashboard gateway.
// Purpose: Implement the core collaborator seams against real backends.
// Dependencies: console-gate-core, reqwest, serde, time
// ============================================================================

//! ## Overview
//! This crate ships the HTTP-backed implementations of the gateway's
//! collaborator seams: the cluster information client, the workgroup
//! directory client, and the metrics backend client. All clients normalize
//! their base URL, attach an optional bearer token, enforce connect and
//! request timeouts, and map response statuses to the typed collaborator
//! errors. None of them retries; retry policy belongs to deployments that
//! need it, never to the gateway core.
//!
//! Security posture: backend responses are untrusted and validated at
//! deserialization; transport errors carry backend detail for local audit
//! only and are never forwarded verbatim to dashboard callers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod cluster;
pub mod metrics;
mod transport;
pub mod workgroup;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use cluster::HttpClusterInfo;
pub use cluster::HttpClusterInfoConfig;
pub use metrics::HttpMetricsBackend;
pub use metrics::HttpMetricsBackendConfig;
pub use workgroup::HttpWorkgroupDirectory;
pub use workgroup::HttpWorkgroupDirectoryConfig;
