// crates/console-gate-server/src/routes.rs
// ============================================================================
// Module: Request Router
// Description: Route table and handlers composing gate and dispatcher.
// Purpose: Gate namespace-scoped operations and shape every outcome.
// Dependencies: console-gate-core, console-gate-providers, axum, serde_json
// ============================================================================

//! ## Overview
//! The router wires each exposed operation to the authorization gate and/or
//! the metrics dispatcher. Namespace-scoped operations authorize before any
//! cluster call and short-circuit on denial; global operations (namespace
//! listing, dashboard configuration) bypass the gate, since listing which
//! namespaces exist is not itself namespace-scoped data. A telemetry layer
//! records one metric event and one latency observation per request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::middleware;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use console_gate_core::AccessError;
use console_gate_core::Admission;
use console_gate_core::AuthorizationGate;
use console_gate_core::ClusterInfoProvider;
use console_gate_core::Event;
use console_gate_core::Identity;
use console_gate_core::MetricsDispatcher;
use console_gate_core::MetricsProvider;
use console_gate_core::UtilizationSeries;
use console_gate_core::WorkgroupDirectory;
use console_gate_providers::HttpClusterInfo;
use console_gate_providers::HttpMetricsBackend;
use console_gate_providers::HttpWorkgroupDirectory;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;
use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::telemetry::GateAuditRecord;
use crate::telemetry::GateAuditSink;
use crate::telemetry::GatewayMetrics;
use crate::telemetry::GatewayOperation;
use crate::telemetry::GatewayOutcome;
use crate::telemetry::NoopGateAuditSink;
use crate::telemetry::NoopGatewayMetrics;
use crate::telemetry::RequestMetricEvent;

// ============================================================================
// SECTION: State
// ============================================================================

/// Identity-extraction settings derived from the server configuration.
///
/// # Invariants
/// - `user_header` is trusted; an upstream auth layer owns its integrity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySettings {
    /// Trusted header carrying the authenticated subject.
    pub user_header: String,
    /// Whether the deployment runs with per-user authentication.
    pub user_auth_enabled: bool,
}

/// Shared state behind every gateway request.
///
/// # Invariants
/// - Immutable after construction; safe for arbitrary concurrency.
pub struct GatewayState {
    /// Namespace-scoped authorization gate.
    gate: AuthorizationGate,
    /// Metrics query dispatcher.
    dispatcher: MetricsDispatcher,
    /// Cluster information backend.
    cluster: Arc<dyn ClusterInfoProvider>,
    /// Request metrics sink.
    metrics_sink: Arc<dyn GatewayMetrics>,
    /// Authorization decision audit sink.
    audit: Arc<dyn GateAuditSink>,
    /// Identity-extraction settings.
    identity: IdentitySettings,
    /// Logout URL served to the dashboard shell.
    logout_url: String,
}

impl GatewayState {
    /// Composes gateway state from its parts.
    #[must_use]
    pub fn new(
        gate: AuthorizationGate,
        dispatcher: MetricsDispatcher,
        cluster: Arc<dyn ClusterInfoProvider>,
        metrics_sink: Arc<dyn GatewayMetrics>,
        audit: Arc<dyn GateAuditSink>,
        identity: IdentitySettings,
        logout_url: String,
    ) -> Self {
        Self {
            gate,
            dispatcher,
            cluster,
            metrics_sink,
            audit,
            identity,
            logout_url,
        }
    }

    /// Builds gateway state from a validated configuration with no-op sinks.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when a collaborator client cannot be built.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, BootstrapError> {
        let cluster = HttpClusterInfo::new(config.cluster.clone())
            .map_err(|err| BootstrapError::Provider(err.to_string()))?;
        let directory: Option<Arc<dyn WorkgroupDirectory>> = match &config.workgroup {
            Some(workgroup) => Some(Arc::new(
                HttpWorkgroupDirectory::new(workgroup.clone())
                    .map_err(|err| BootstrapError::Provider(err.to_string()))?,
            )),
            None => None,
        };
        let metrics: Option<Arc<dyn MetricsProvider>> = match &config.metrics {
            Some(metrics) => Some(Arc::new(
                HttpMetricsBackend::new(metrics.clone())
                    .map_err(|err| BootstrapError::Provider(err.to_string()))?,
            )),
            None => None,
        };
        Ok(Self::new(
            AuthorizationGate::new(directory),
            MetricsDispatcher::new(metrics),
            Arc::new(cluster),
            Arc::new(NoopGatewayMetrics),
            Arc::new(NoopGateAuditSink),
            IdentitySettings {
                user_header: config.server.user_header.clone(),
                user_auth_enabled: config.server.user_auth_enabled,
            },
            config.ui.logout_url.clone(),
        ))
    }
}

/// Gateway startup failures.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The configuration failed to load or validate.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// A collaborator client could not be built.
    #[error("provider initialization failed: {0}")]
    Provider(String),
}

// ============================================================================
// SECTION: Identity Extraction
// ============================================================================

/// Subject attached when per-user authentication is disabled.
const BASIC_AUTH_SUBJECT: &str = "anonymous";

/// Derives the request identity from the trusted header.
///
/// With per-user auth disabled every request carries the shared
/// non-identity; with it enabled, a missing or empty header means no
/// identity could be established.
fn identity_from_headers(settings: &IdentitySettings, headers: &HeaderMap) -> Option<Identity> {
    if !settings.user_auth_enabled {
        return Some(Identity::basic_auth(BASIC_AUTH_SUBJECT));
    }
    let subject = headers.get(settings.user_header.as_str())?.to_str().ok()?.trim();
    if subject.is_empty() {
        return None;
    }
    Some(Identity::authenticated(subject))
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Builds the gateway route table over the shared state.
pub fn gateway_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/api/metrics/{type}", get(handle_metrics))
        .route("/api/namespaces", get(handle_namespaces))
        .route("/api/activities/{namespace}", get(handle_activities))
        .route("/api/dashboard-links", get(handle_dashboard_links))
        .route("/api/dashboard-settings", get(handle_dashboard_settings))
        .route("/api/env-info", get(handle_env_info))
        .route("/healthz", get(handle_health))
        .layer(middleware::from_fn_with_state(state.clone(), telemetry_layer))
        .with_state(state)
}

/// Records one metric event and one latency observation per request.
async fn telemetry_layer(
    State(state): State<Arc<GatewayState>>,
    request: Request,
    next: Next,
) -> Response {
    let operation = GatewayOperation::classify(request.uri().path());
    let started = Instant::now();
    let response = next.run(request).await;
    let outcome = if response.status().is_success() {
        GatewayOutcome::Ok
    } else {
        GatewayOutcome::Error
    };
    let event = RequestMetricEvent {
        operation,
        outcome,
        status: response.status().as_u16(),
    };
    state.metrics_sink.record_request(event.clone());
    state.metrics_sink.record_latency(event, started.elapsed());
    response
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Query parameters accepted by the metrics operation.
#[derive(Debug, Deserialize)]
struct MetricsQuery {
    /// Interval token; unknown values fall back to the default window.
    interval: Option<String>,
}

/// Serves a utilization series for the requested metric type.
async fn handle_metrics(
    State(state): State<Arc<GatewayState>>,
    Path(metric_type): Path<String>,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<UtilizationSeries>, ApiError> {
    let series = state.dispatcher.dispatch(&metric_type, query.interval.as_deref()).await?;
    Ok(Json(series))
}

/// Lists the namespaces known to the cluster; not namespace-scoped.
async fn handle_namespaces(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let namespaces = state
        .cluster
        .list_namespaces()
        .await
        .map_err(|_| ApiError::ClusterUnavailable)?;
    Ok(Json(namespaces))
}

/// Lists events for a namespace after the gate admits the caller.
async fn handle_activities(
    State(state): State<Arc<GatewayState>>,
    Path(namespace): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<Event>>, ApiError> {
    let identity = identity_from_headers(&state.identity, &headers);
    let decision = state.gate.authorize(Some(&namespace), identity.as_ref()).await;
    audit_decision(&state, identity.as_ref(), &namespace, &decision);
    // A denial short-circuits; the events call is never issued.
    decision?;
    let events = state
        .cluster
        .list_events(&namespace)
        .await
        .map_err(|_| ApiError::ClusterUnavailable)?;
    Ok(Json(events))
}

/// Records the gate decision for audit sinks.
fn audit_decision(
    state: &GatewayState,
    identity: Option<&Identity>,
    namespace: &str,
    decision: &Result<Admission, AccessError>,
) {
    let (allowed, reason, detail) = match decision {
        Ok(admission) => (true, admission.as_str(), None),
        Err(error) => {
            let detail = match error {
                AccessError::AuthorizationUnavailable(source) => Some(source.to_string()),
                _ => None,
            };
            (false, error.kind(), detail)
        }
    };
    state.audit.record(&GateAuditRecord {
        subject: identity.map(|identity| identity.subject.clone()),
        namespace: Some(namespace.to_string()),
        allowed,
        reason,
        detail,
    });
}

/// Serves the dashboard menu link configuration.
async fn handle_dashboard_links(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<Value>, ApiError> {
    decoded_config_key(state.as_ref(), "links", ApiError::InvalidLinksConfig).await
}

/// Serves the dashboard settings configuration.
async fn handle_dashboard_settings(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<Value>, ApiError> {
    decoded_config_key(state.as_ref(), "settings", ApiError::InvalidSettingsConfig).await
}

/// Fetches the configuration map and decodes one JSON-encoded key.
///
/// An absent key yields an empty object; a fetch or decode failure yields
/// the supplied error so each operation keeps its fixed message.
async fn decoded_config_key(
    state: &GatewayState,
    key: &str,
    error: ApiError,
) -> Result<Json<Value>, ApiError> {
    let Ok(config) = state.cluster.dashboard_config().await else {
        return Err(error);
    };
    match config.data.get(key) {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(value) => Ok(Json(value)),
            Err(_) => Err(error),
        },
        None => Ok(Json(Value::Object(Map::new()))),
    }
}

/// Environment information served to the dashboard shell.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvInfo {
    /// Authenticated subject, when one is attached.
    user: Option<String>,
    /// Logout URL the dashboard shell redirects to.
    logout_url: String,
    /// Whether utilization queries are available on this deployment.
    metrics_available: bool,
    /// Whether namespace isolation is enforced.
    namespace_isolation: bool,
}

/// Serves deployment facts the dashboard shell needs at boot.
async fn handle_env_info(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Json<EnvInfo> {
    let identity = identity_from_headers(&state.identity, &headers);
    Json(EnvInfo {
        user: identity.map(|identity| identity.subject),
        logout_url: state.logout_url.clone(),
        metrics_available: state.dispatcher.provider_configured(),
        namespace_isolation: state.gate.directory_configured(),
    })
}

/// Liveness probe.
async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
