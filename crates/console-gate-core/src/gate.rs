// crates/console-gate-core/src/gate.rs
// ============================================================================
// Module: Authorization Gate
// Description: Namespace-scoped read-authorization decision procedure.
// Purpose: Decide whether a caller may view data scoped to a namespace.
// Dependencies: crate::identity, crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! The authorization gate admits or denies namespace-scoped requests. A
//! caller is admitted when it holds any role binding in the namespace, is a
//! cluster admin, or the deployment runs without per-user identity. When no
//! workgroup directory is configured the gate admits unconditionally; this
//! is a deliberate backward-compatibility mode keyed on deployment
//! configuration, never on request content.
//!
//! ## Invariants
//! - Decisions are deterministic for identical inputs and directory state.
//! - The gate performs at most one directory lookup and no other side effect.
//! - Directory failures deny; they are never treated as an allow.
//! - Denial messages name the denied namespace but never the caller's
//!   binding list.
//!
//! Security posture: the gate is a trust boundary and fails closed on every
//! path except the explicit compatibility modes above.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::identity::Identity;
use crate::identity::WorkgroupInfo;
use crate::interfaces::DirectoryError;
use crate::interfaces::WorkgroupDirectory;

// ============================================================================
// SECTION: Decision Types
// ============================================================================

/// Reason label attached to an admit decision.
///
/// # Invariants
/// - Variants identify why access was admitted; labels are stable for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// No workgroup directory is configured; compatibility mode admits.
    DirectoryUnconfigured,
    /// Deployment runs without per-user identity; isolation is not enforced.
    BasicAuthMode,
    /// Caller holds the cluster-admin flag.
    ClusterAdmin,
    /// Caller holds a role binding in the requested namespace.
    RoleBinding,
}

impl Admission {
    /// Returns the stable audit label for the admission reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DirectoryUnconfigured => "directory_unconfigured",
            Self::BasicAuthMode => "basic_auth_mode",
            Self::ClusterAdmin => "cluster_admin",
            Self::RoleBinding => "role_binding",
        }
    }
}

/// Denial outcomes of the authorization gate.
///
/// # Invariants
/// - Display strings are the full user-facing payload; no internal detail.
/// - `NamespaceAccessDenied` names the denied namespace only.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The request carried no namespace parameter.
    #[error("namespace parameter is required")]
    MissingNamespace,
    /// No identity was attached to the request.
    #[error("authentication required to access namespace activities")]
    AuthenticationRequired,
    /// The caller holds no binding in the requested namespace.
    #[error("access denied: no permission to view activities for namespace '{namespace}'")]
    NamespaceAccessDenied {
        /// Namespace the caller was denied access to.
        namespace: String,
    },
    /// The directory lookup failed; the gate fails closed.
    #[error("unable to verify namespace access permissions")]
    AuthorizationUnavailable(#[source] DirectoryError),
}

impl AccessError {
    /// Returns a stable kind label for audit and metrics sinks.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingNamespace => "missing_namespace",
            Self::AuthenticationRequired => "authentication_required",
            Self::NamespaceAccessDenied {
                ..
            } => "namespace_access_denied",
            Self::AuthorizationUnavailable(_) => "authorization_unavailable",
        }
    }
}

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Namespace-scoped read-authorization gate.
///
/// # Invariants
/// - Holds no per-request state; safe to share across concurrent requests.
/// - An absent directory selects the compatibility admit mode.
pub struct AuthorizationGate {
    /// Workgroup directory, when the deployment configures one.
    directory: Option<Arc<dyn WorkgroupDirectory>>,
}

impl AuthorizationGate {
    /// Creates a gate backed by the optional workgroup directory.
    #[must_use]
    pub fn new(directory: Option<Arc<dyn WorkgroupDirectory>>) -> Self {
        Self {
            directory,
        }
    }

    /// Returns true when a workgroup directory is configured.
    #[must_use]
    pub const fn directory_configured(&self) -> bool {
        self.directory.is_some()
    }

    /// Decides whether the caller may view data scoped to `namespace`.
    ///
    /// The namespace check runs before any collaborator call. With a
    /// configured directory the gate requires an identity, admits
    /// non-identity deployments unconditionally, and otherwise resolves the
    /// caller's workgroup membership exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] on every denial path; see the variant docs
    /// for the status classification each one maps to.
    pub async fn authorize(
        &self,
        namespace: Option<&str>,
        identity: Option<&Identity>,
    ) -> Result<Admission, AccessError> {
        let namespace = match namespace {
            Some(value) if !value.trim().is_empty() => value,
            _ => return Err(AccessError::MissingNamespace),
        };

        // Backward compatibility: deployments without a directory never
        // enforced namespace isolation.
        let Some(directory) = self.directory.as_ref() else {
            return Ok(Admission::DirectoryUnconfigured);
        };

        let Some(identity) = identity else {
            return Err(AccessError::AuthenticationRequired);
        };

        if !identity.has_auth {
            return Ok(Admission::BasicAuthMode);
        }

        let info = directory
            .resolve(identity)
            .await
            .map_err(AccessError::AuthorizationUnavailable)?;
        evaluate_membership(namespace, &info)
    }
}

/// Evaluates resolved membership against the requested namespace.
fn evaluate_membership(
    namespace: &str,
    info: &WorkgroupInfo,
) -> Result<Admission, AccessError> {
    if info.is_cluster_admin {
        return Ok(Admission::ClusterAdmin);
    }
    if info.binds_namespace(namespace) {
        return Ok(Admission::RoleBinding);
    }
    Err(AccessError::NamespaceAccessDenied {
        namespace: namespace.to_string(),
    })
}

#[cfg(test)]
mod tests;
