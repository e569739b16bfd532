// crates/console-gate-core/src/lib.rs
// ============================================================================
// Module: Console Gate Core
// Description: Authorization gate, metrics dispatch, and collaborator seams.
// Purpose: Provide the request-scoped decision logic for the dashboard gateway.
// Dependencies: serde, thiserror, async-trait, time
// ============================================================================

//! ## Overview
//! This crate holds the decision logic of the dashboard gateway: the
//! namespace-scoped authorization gate, the metric-type and interval
//! enumerations with their dispatcher, and the trait seams for the external
//! collaborators (cluster information, workgroup directory, metrics backend).
//! All state is request-scoped; nothing in this crate caches across requests
//! or retries collaborator calls.
//!
//! Security posture: the authorization gate is a trust boundary and fails
//! closed on directory errors; only the deliberate unconfigured-directory
//! compatibility mode admits without a lookup.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod gate;
pub mod identity;
pub mod interfaces;
pub mod metrics;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use gate::AccessError;
pub use gate::Admission;
pub use gate::AuthorizationGate;
pub use identity::Identity;
pub use identity::Role;
pub use identity::RoleBinding;
pub use identity::WorkgroupInfo;
pub use interfaces::ClusterInfoError;
pub use interfaces::ClusterInfoProvider;
pub use interfaces::DashboardConfig;
pub use interfaces::DirectoryError;
pub use interfaces::Event;
pub use interfaces::MetricsError;
pub use interfaces::MetricsProvider;
pub use interfaces::UtilizationPoint;
pub use interfaces::UtilizationSeries;
pub use interfaces::WorkgroupDirectory;
pub use metrics::DispatchError;
pub use metrics::MetricType;
pub use metrics::MetricsDispatcher;
pub use metrics::MetricsInterval;
