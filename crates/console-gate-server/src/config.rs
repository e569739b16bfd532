// crates/console-gate-server/src/config.rs
// ============================================================================
// Module: Gateway Configuration
// Description: TOML-loadable deployment configuration with validation.
// Purpose: Make every deployment mode an explicit, validated setting.
// Dependencies: console-gate-providers, serde, toml, url
// ============================================================================

//! ## Overview
//! The gateway configuration selects the deployment mode explicitly: an
//! absent `workgroup` section puts the gate in its unconfigured
//! compatibility mode, an absent `metrics` section disables utilization
//! queries, and UI settings such as the logout URL are plain fields passed
//! into the components that serve them. Validation runs at load time and
//! names the offending field; a gateway never starts half-configured.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;

use console_gate_providers::HttpClusterInfoConfig;
use console_gate_providers::HttpMetricsBackendConfig;
use console_gate_providers::HttpWorkgroupDirectoryConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration failures.
///
/// # Invariants
/// - `Invalid` names the offending field for operator diagnostics.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration file {path}: {detail}")]
    Read {
        /// Path the gateway attempted to read.
        path: String,
        /// Filesystem error detail.
        detail: String,
    },
    /// The configuration file could not be parsed as TOML.
    #[error("cannot parse configuration: {0}")]
    Parse(String),
    /// A configuration value failed validation.
    #[error("invalid configuration: {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// HTTP listener and identity-extraction settings.
///
/// # Invariants
/// - `user_header` names the trusted header the auth layer sets; the
///   gateway attaches identities, it never authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Socket address the gateway listens on.
    pub bind_addr: String,
    /// Trusted header carrying the authenticated subject.
    pub user_header: String,
    /// Whether the deployment runs with per-user authentication.
    pub user_auth_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8082".to_string(),
            user_header: "kubeflow-userid".to_string(),
            user_auth_enabled: true,
        }
    }
}

/// UI passthrough settings served to the dashboard shell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UiConfig {
    /// Logout URL the dashboard shell redirects to.
    pub logout_url: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            logout_url: "/logout".to_string(),
        }
    }
}

/// Top-level gateway configuration.
///
/// # Invariants
/// - Optional sections select deployment modes; absence is meaningful and
///   never an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct GatewayConfig {
    /// Listener and identity settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Cluster information backend settings.
    #[serde(default)]
    pub cluster: HttpClusterInfoConfig,
    /// Workgroup directory settings; absent selects the compatibility mode.
    #[serde(default)]
    pub workgroup: Option<HttpWorkgroupDirectoryConfig>,
    /// Metrics backend settings; absent disables utilization queries.
    #[serde(default)]
    pub metrics: Option<HttpMetricsBackendConfig>,
    /// UI passthrough settings.
    #[serde(default)]
    pub ui: UiConfig,
}

impl GatewayConfig {
    /// Loads and validates the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or
    /// when any field fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            detail: err.to_string(),
        })?;
        let config: Self =
            toml::from_str(&raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every field, naming the first offender.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.bind_addr.parse::<SocketAddr>().map_err(|err| {
            ConfigError::Invalid {
                field: "server.bind_addr",
                reason: err.to_string(),
            }
        })?;
        require_nonempty("server.user_header", &self.server.user_header)?;
        require_base_url("cluster.base_url", &self.cluster.base_url)?;
        require_nonempty("cluster.configmap_namespace", &self.cluster.configmap_namespace)?;
        require_nonempty("cluster.configmap_name", &self.cluster.configmap_name)?;
        require_timeouts(
            "cluster",
            self.cluster.connect_timeout_ms,
            self.cluster.request_timeout_ms,
        )?;
        if let Some(workgroup) = &self.workgroup {
            require_base_url("workgroup.base_url", &workgroup.base_url)?;
            require_timeouts(
                "workgroup",
                workgroup.connect_timeout_ms,
                workgroup.request_timeout_ms,
            )?;
        }
        if let Some(metrics) = &self.metrics {
            require_base_url("metrics.base_url", &metrics.base_url)?;
            require_timeouts(
                "metrics",
                metrics.connect_timeout_ms,
                metrics.request_timeout_ms,
            )?;
        }
        require_nonempty("ui.logout_url", &self.ui.logout_url)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Rejects empty or whitespace-only values.
fn require_nonempty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "value must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Rejects base URLs that are not absolute http(s) URLs.
fn require_base_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|err| ConfigError::Invalid {
        field,
        reason: err.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(())
}

/// Rejects zero timeouts; the field name covers both values of a section.
fn require_timeouts(
    section: &'static str,
    connect_timeout_ms: u64,
    request_timeout_ms: u64,
) -> Result<(), ConfigError> {
    if connect_timeout_ms == 0 || request_timeout_ms == 0 {
        return Err(ConfigError::Invalid {
            field: section,
            reason: "timeouts must be greater than zero".to_string(),
        });
    }
    Ok(())
}
