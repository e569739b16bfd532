// crates/console-gate-server/src/lib.rs
// ============================================================================
// Module: Console Gate Server
// Description: HTTP surface composing the gate and dispatcher per request.
// Purpose: Expose the gateway operations with normalized error shaping.
// Dependencies: console-gate-core, console-gate-providers, axum, tokio
// ============================================================================

//! ## Overview
//! This crate wires the authorization gate and metrics dispatcher in front
//! of the exposed dashboard operations. Every outcome reduces to one shape:
//! the raw success payload, or a `{ "error": string }` body with one status
//! classification. Telemetry and audit run through trait seams with no-op
//! defaults so deployments plug their own sinks in without redesign.
//!
//! Security posture: internal error detail stays on the server side of the
//! boundary; responses carry fixed messages only.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::GatewayConfig;
pub use config::ServerConfig;
pub use config::UiConfig;
pub use error::ApiError;
pub use error::ErrorBody;
pub use routes::BootstrapError;
pub use routes::GatewayState;
pub use routes::IdentitySettings;
pub use routes::gateway_router;
pub use telemetry::GateAuditRecord;
pub use telemetry::GateAuditSink;
pub use telemetry::GatewayMetrics;
pub use telemetry::GatewayOperation;
pub use telemetry::GatewayOutcome;
pub use telemetry::NoopGateAuditSink;
pub use telemetry::NoopGatewayMetrics;
pub use telemetry::RequestMetricEvent;
