// crates/console-gate-core/src/interfaces/tests.rs
// ============================================================================
// Module: Collaborator Interface Tests
// Description: Unit tests for collaborator payload wire forms.
// Purpose: Pin camelCase decoding, optional fields, and membership lookup.
// Dependencies: console-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises the serde wire forms of collaborator payloads so backend
//! responses keep decoding across refactors.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::json;

use super::DashboardConfig;
use super::Event;
use super::UtilizationSeries;
use crate::identity::Role;
use crate::identity::RoleBinding;
use crate::identity::WorkgroupInfo;

// ============================================================================
// SECTION: Wire Forms
// ============================================================================

#[test]
fn event_decodes_camel_case_payload() {
    let event: Event = serde_json::from_value(json!({
        "timestamp": "2026-02-11T09:30:00Z",
        "type": "Warning",
        "reason": "FailedScheduling",
        "message": "0/3 nodes are available",
        "involvedObject": "training-job-0",
    }))
    .expect("event");
    assert_eq!(event.kind, "Warning");
    assert_eq!(event.involved_object, "training-job-0");
    assert!(event.timestamp.is_some());
}

#[test]
fn event_timestamp_is_optional() {
    let event: Event = serde_json::from_value(json!({
        "type": "Normal",
        "reason": "Created",
        "message": "created pod",
        "involvedObject": "notebook-0",
    }))
    .expect("event");
    assert!(event.timestamp.is_none());
}

#[test]
fn dashboard_config_defaults_to_empty_data() {
    let config: DashboardConfig = serde_json::from_value(json!({})).expect("config");
    assert!(config.data.is_empty());
}

#[test]
fn utilization_series_round_trips() {
    let series: UtilizationSeries = serde_json::from_value(json!({
        "points": [
            {"timestamp": 1_700_000_000_000_i64, "value": 0.42},
            {"timestamp": 1_700_000_060_000_i64, "label": "node-1", "value": 0.43},
        ],
    }))
    .expect("series");
    assert_eq!(series.points.len(), 2);
    assert!(series.points[0].label.is_none());
    let encoded = serde_json::to_value(&series).expect("encode");
    let decoded: UtilizationSeries = serde_json::from_value(encoded).expect("decode");
    assert_eq!(decoded, series);
}

#[test]
fn role_tokens_are_lowercase() {
    let binding: RoleBinding = serde_json::from_value(json!({
        "namespace": "team-a",
        "role": "contributor",
    }))
    .expect("binding");
    assert_eq!(binding.role, Role::Contributor);
    assert!(serde_json::from_value::<RoleBinding>(json!({
        "namespace": "team-a",
        "role": "Admin",
    }))
    .is_err());
}

// ============================================================================
// SECTION: Membership Lookup
// ============================================================================

#[test]
fn binds_namespace_matches_exactly() {
    let info = WorkgroupInfo {
        is_cluster_admin: false,
        namespaces: vec![RoleBinding {
            namespace: "team-a".to_string(),
            role: Role::Viewer,
        }],
    };
    assert!(info.binds_namespace("team-a"));
    assert!(!info.binds_namespace("team-a2"));
    assert!(!info.binds_namespace("team"));
}
