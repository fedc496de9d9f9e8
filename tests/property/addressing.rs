// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Addressing and Indexing

use proptest::prelude::*;
use serde_json::{json, Value};
use switchmap::domain::{address, TopologyDocument};
use switchmap::index::build;

// ============================================================================
// Strategies
// ============================================================================

/// A port with or without an attached device
fn port() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z]{1,8}-[0-9]{1,3}")
}

fn ports() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(port(), 0..30)
}

/// One switch `sw1`, one linecard with `template`, the given ports
fn document(template: &str, ports: &[Option<String>]) -> TopologyDocument {
    let ports: Vec<Value> = ports
        .iter()
        .map(|uid| match uid {
            Some(uid) => json!({ "uid": uid }),
            None => json!({ "kind": "node" }),
        })
        .collect();
    serde_json::from_value(json!({
        "items": [ { "type": "network_equipment", "uid": "sw1",
                     "linecards": [ { "snmp_pattern": template, "ports": ports } ] } ]
    }))
    .expect("Invalid generated document")
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: linecard and port positions are substituted in decimal
    #[test]
    fn prop_slot_template(l in 0usize..10_000, p in 0usize..10_000) {
        prop_assert_eq!(address("slot%LINECARD%/%PORT%", l, p), format!("slot{}/{}", l, p));
    }

    /// Property: templates without placeholders are returned untouched
    #[test]
    fn prop_plain_template_unchanged(template in "[A-Za-z0-9/._-]{0,16}", l in 0usize..64, p in 0usize..64) {
        prop_assert_eq!(address(&template, l, p), template);
    }

    /// Property: only the first occurrence of each placeholder is replaced
    #[test]
    fn prop_single_substitution(l in 0usize..64, p in 0usize..64) {
        prop_assert_eq!(
            address("%LINECARD%%LINECARD%:%PORT%%PORT%", l, p),
            format!("{}%LINECARD%:{}%PORT%", l, p)
        );
    }

    /// Property: index keys are exactly the addresses of ports with a device
    #[test]
    fn prop_only_attached_ports_indexed(ports in ports()) {
        let build = build(&document("p%PORT%", &ports), "nancy");

        let expected: Vec<String> = ports
            .iter()
            .enumerate()
            .filter(|(_, uid)| uid.is_some())
            .map(|(p, _)| format!("p{}", p))
            .collect();
        let actual: Vec<String> = build
            .index
            .ports("sw1")
            .map(|ports| ports.keys().cloned().collect())
            .unwrap_or_default();

        prop_assert_eq!(actual, expected);
        prop_assert!(build.diagnostics.is_empty());
    }

    /// Property: colliding addresses keep the last attached device
    #[test]
    fn prop_last_write_wins(ports in ports()) {
        let build = build(&document("mgmt0", &ports), "nancy");

        let last = ports.iter().rev().flatten().next();
        match last {
            Some(uid) => {
                prop_assert_eq!(build.index.port_count(), 1);
                let expected = format!("nancy.{}", uid);
                prop_assert_eq!(build.index.lookup("sw1", "mgmt0").map(|d| d.as_str()), Some(expected.as_str()));
            }
            None => prop_assert!(build.index.is_empty()),
        }
    }
}
