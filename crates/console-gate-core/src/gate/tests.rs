// crates/console-gate-core/src/gate/tests.rs
// ============================================================================
// Module: Authorization Gate Tests
// Description: Unit tests for the namespace admission decision procedure.
// Purpose: Validate decision ordering, compatibility modes, and fail-closed paths.
// Dependencies: console-gate-core, tokio, proptest
// ============================================================================

//! ## Overview
//! Exercises the gate decision order with in-memory directory fixtures:
//! missing-namespace short circuit, compatibility admits, membership
//! evaluation, and fail-closed directory errors.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use proptest::prelude::*;

use super::AccessError;
use super::Admission;
use super::AuthorizationGate;
use super::evaluate_membership;
use crate::identity::Identity;
use crate::identity::Role;
use crate::identity::RoleBinding;
use crate::identity::WorkgroupInfo;
use crate::interfaces::DirectoryError;
use crate::interfaces::WorkgroupDirectory;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

struct StaticDirectory {
    info: WorkgroupInfo,
    lookups: Mutex<u32>,
}

impl StaticDirectory {
    fn new(info: WorkgroupInfo) -> Self {
        Self {
            info,
            lookups: Mutex::new(0),
        }
    }

    fn lookup_count(&self) -> u32 {
        *self.lookups.lock().expect("lookups lock")
    }
}

#[async_trait]
impl WorkgroupDirectory for StaticDirectory {
    async fn resolve(&self, _identity: &Identity) -> Result<WorkgroupInfo, DirectoryError> {
        *self.lookups.lock().expect("lookups lock") += 1;
        Ok(self.info.clone())
    }
}

struct FailingDirectory;

#[async_trait]
impl WorkgroupDirectory for FailingDirectory {
    async fn resolve(&self, _identity: &Identity) -> Result<WorkgroupInfo, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_string()))
    }
}

fn viewer_info(namespaces: &[&str]) -> WorkgroupInfo {
    WorkgroupInfo {
        is_cluster_admin: false,
        namespaces: namespaces
            .iter()
            .map(|namespace| RoleBinding {
                namespace: (*namespace).to_string(),
                role: Role::Viewer,
            })
            .collect(),
    }
}

fn gate_with(directory: impl WorkgroupDirectory + 'static) -> AuthorizationGate {
    AuthorizationGate::new(Some(Arc::new(directory)))
}

// ============================================================================
// SECTION: Namespace Parameter
// ============================================================================

#[tokio::test]
async fn missing_namespace_denied_regardless_of_identity() {
    let gate = gate_with(StaticDirectory::new(viewer_info(&["team-a"])));
    let identity = Identity::authenticated("user@example.com");
    for identity in [None, Some(&identity)] {
        let result = gate.authorize(None, identity).await;
        assert!(matches!(result, Err(AccessError::MissingNamespace)));
    }
}

#[tokio::test]
async fn empty_namespace_treated_as_missing() {
    let gate = gate_with(StaticDirectory::new(viewer_info(&["team-a"])));
    let identity = Identity::authenticated("user@example.com");
    for namespace in ["", "   "] {
        let result = gate.authorize(Some(namespace), Some(&identity)).await;
        assert!(matches!(result, Err(AccessError::MissingNamespace)));
    }
}

#[tokio::test]
async fn missing_namespace_checked_before_directory_lookup() {
    let directory = Arc::new(StaticDirectory::new(viewer_info(&["team-a"])));
    let gate = AuthorizationGate::new(Some(directory.clone()));
    let identity = Identity::authenticated("user@example.com");
    let result = gate.authorize(None, Some(&identity)).await;
    assert!(matches!(result, Err(AccessError::MissingNamespace)));
    assert_eq!(directory.lookup_count(), 0);
}

// ============================================================================
// SECTION: Compatibility Modes
// ============================================================================

#[tokio::test]
async fn unconfigured_directory_admits_without_identity() {
    let gate = AuthorizationGate::new(None);
    let admission = gate.authorize(Some("team-a"), None).await.expect("admit");
    assert_eq!(admission, Admission::DirectoryUnconfigured);
}

#[tokio::test]
async fn unconfigured_directory_admits_every_namespace() {
    let gate = AuthorizationGate::new(None);
    let identity = Identity::authenticated("user@example.com");
    for namespace in ["team-a", "team-b", "kube-system"] {
        let admission =
            gate.authorize(Some(namespace), Some(&identity)).await.expect("admit");
        assert_eq!(admission, Admission::DirectoryUnconfigured);
    }
}

#[tokio::test]
async fn unconfigured_directory_still_requires_namespace() {
    let gate = AuthorizationGate::new(None);
    let result = gate.authorize(None, None).await;
    assert!(matches!(result, Err(AccessError::MissingNamespace)));
}

#[tokio::test]
async fn basic_auth_identity_admitted_without_lookup() {
    let directory = Arc::new(StaticDirectory::new(viewer_info(&[])));
    let gate = AuthorizationGate::new(Some(directory.clone()));
    let identity = Identity::basic_auth("anonymous");
    let admission =
        gate.authorize(Some("team-b"), Some(&identity)).await.expect("admit");
    assert_eq!(admission, Admission::BasicAuthMode);
    assert_eq!(directory.lookup_count(), 0);
}

// ============================================================================
// SECTION: Identity Requirement
// ============================================================================

#[tokio::test]
async fn configured_directory_requires_identity() {
    let gate = gate_with(StaticDirectory::new(viewer_info(&["team-a"])));
    let result = gate.authorize(Some("team-a"), None).await;
    assert!(matches!(result, Err(AccessError::AuthenticationRequired)));
}

// ============================================================================
// SECTION: Membership Evaluation
// ============================================================================

#[tokio::test]
async fn cluster_admin_admitted_for_every_namespace() {
    let info = WorkgroupInfo {
        is_cluster_admin: true,
        namespaces: Vec::new(),
    };
    let gate = gate_with(StaticDirectory::new(info));
    let identity = Identity::authenticated("admin@example.com");
    for namespace in ["team-a", "team-b", "kube-system"] {
        let admission =
            gate.authorize(Some(namespace), Some(&identity)).await.expect("admit");
        assert_eq!(admission, Admission::ClusterAdmin);
    }
}

#[tokio::test]
async fn bound_namespace_admitted() {
    let gate = gate_with(StaticDirectory::new(viewer_info(&["team-a"])));
    let identity = Identity::authenticated("user@example.com");
    let admission =
        gate.authorize(Some("team-a"), Some(&identity)).await.expect("admit");
    assert_eq!(admission, Admission::RoleBinding);
}

#[tokio::test]
async fn unbound_namespace_denied_naming_namespace() {
    let gate = gate_with(StaticDirectory::new(viewer_info(&["team-a", "team-c"])));
    let identity = Identity::authenticated("user@example.com");
    let error = gate
        .authorize(Some("team-b"), Some(&identity))
        .await
        .expect_err("deny");
    let message = error.to_string();
    assert!(matches!(error, AccessError::NamespaceAccessDenied { .. }));
    assert!(message.contains("team-b"));
    // The denial must not leak the caller's other bindings.
    assert!(!message.contains("team-a"));
    assert!(!message.contains("team-c"));
}

#[tokio::test]
async fn role_level_is_irrelevant_for_read_access() {
    for role in [Role::Owner, Role::Contributor, Role::Viewer] {
        let info = WorkgroupInfo {
            is_cluster_admin: false,
            namespaces: vec![RoleBinding {
                namespace: "team-a".to_string(),
                role,
            }],
        };
        let gate = gate_with(StaticDirectory::new(info));
        let identity = Identity::authenticated("user@example.com");
        let admission =
            gate.authorize(Some("team-a"), Some(&identity)).await.expect("admit");
        assert_eq!(admission, Admission::RoleBinding);
    }
}

// ============================================================================
// SECTION: Directory Failures
// ============================================================================

#[tokio::test]
async fn directory_failure_denies_with_fixed_message() {
    let gate = gate_with(FailingDirectory);
    let identity = Identity::authenticated("user@example.com");
    let error = gate
        .authorize(Some("team-a"), Some(&identity))
        .await
        .expect_err("deny");
    assert!(matches!(error, AccessError::AuthorizationUnavailable(_)));
    // The fixed message must not surface the transport detail.
    assert_eq!(error.to_string(), "unable to verify namespace access permissions");
}

// ============================================================================
// SECTION: Determinism
// ============================================================================

#[tokio::test]
async fn repeated_calls_produce_identical_decisions() {
    let gate = gate_with(StaticDirectory::new(viewer_info(&["team-a"])));
    let identity = Identity::authenticated("user@example.com");
    for _ in 0..3 {
        let admission =
            gate.authorize(Some("team-a"), Some(&identity)).await.expect("admit");
        assert_eq!(admission, Admission::RoleBinding);
        let error = gate
            .authorize(Some("team-b"), Some(&identity))
            .await
            .expect_err("deny");
        assert_eq!(error.kind(), "namespace_access_denied");
    }
}

proptest! {
    #[test]
    fn membership_admits_iff_bound_or_admin(
        namespace in "[a-z][a-z0-9-]{0,20}",
        bound in proptest::collection::vec("[a-z][a-z0-9-]{0,20}", 0..8),
        is_cluster_admin in any::<bool>(),
    ) {
        let info = WorkgroupInfo {
            is_cluster_admin,
            namespaces: bound
                .iter()
                .map(|name| RoleBinding {
                    namespace: name.clone(),
                    role: Role::Viewer,
                })
                .collect(),
        };
        let expected = is_cluster_admin || bound.iter().any(|name| *name == namespace);
        let decision = evaluate_membership(&namespace, &info);
        prop_assert_eq!(decision.is_ok(), expected);
        if let Err(AccessError::NamespaceAccessDenied { namespace: denied }) = decision {
            prop_assert_eq!(denied, namespace);
        }
    }
}
