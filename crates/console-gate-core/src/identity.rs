// crates/console-gate-core/src/identity.rs
// ============================================================================
// Module: Identity Model
// Description: Per-request identity, roles, and workgroup membership values.
// Purpose: Provide the read-only inputs consumed by the authorization gate.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The identity model covers the values an upstream authentication layer
//! attaches to a request and the membership data the workgroup directory
//! resolves for it. Instances live for a single authorization decision and
//! are discarded with the request; nothing here is cached by the core.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identity
// ============================================================================

/// Authenticated identity attached to a request by the upstream auth layer.
///
/// # Invariants
/// - `subject` is an opaque principal identifier; the core never parses it.
/// - `has_auth` is false only on deployments without per-user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque principal identifier (a user email in typical deployments).
    pub subject: String,
    /// Whether the deployment runs with per-user authentication.
    pub has_auth: bool,
}

impl Identity {
    /// Creates an identity for a per-user authenticated deployment.
    #[must_use]
    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            has_auth: true,
        }
    }

    /// Creates the shared identity used on deployments without per-user auth.
    #[must_use]
    pub fn basic_auth(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            has_auth: false,
        }
    }
}

// ============================================================================
// SECTION: Roles and Bindings
// ============================================================================

/// Permission level associated with a namespace role binding.
///
/// # Invariants
/// - Variants are a closed set; wire tokens are lowercase and stable.
/// - Read authorization ignores the role; it matters only for mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control over the namespace.
    Owner,
    /// Can create and modify resources in the namespace.
    Contributor,
    /// Read-only access to the namespace.
    Viewer,
}

impl Role {
    /// Returns the stable lowercase wire token for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Contributor => "contributor",
            Self::Viewer => "viewer",
        }
    }
}

/// Association between an identity and a namespace at a permission level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    /// Namespace the binding grants access to.
    pub namespace: String,
    /// Permission level within the namespace.
    pub role: Role,
}

/// Membership data resolved by the workgroup directory for one decision.
///
/// # Invariants
/// - Fetched once per authorization decision and discarded afterwards.
/// - Binding order is preserved as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkgroupInfo {
    /// Whether the identity holds the cluster-admin flag.
    pub is_cluster_admin: bool,
    /// Namespace role bindings held by the identity.
    pub namespaces: Vec<RoleBinding>,
}

impl WorkgroupInfo {
    /// Returns true when any binding names the given namespace.
    #[must_use]
    pub fn binds_namespace(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|binding| binding.namespace == namespace)
    }
}
