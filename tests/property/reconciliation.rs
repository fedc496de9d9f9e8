// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Reconciliation
//!
//! Positions, trimming and per-switch failure isolation over arbitrary walks.

use proptest::prelude::*;
use serde_json::{json, Value};
use switchmap::domain::TopologyDocument;
use switchmap::index::build;
use switchmap::{reconcile, LiveInterfaceWalk, MapperConfig, ProbeMapper, SwitchOutcome};

use crate::fixtures::{FixtureSource, FixtureWalker};

// ============================================================================
// Strategies
// ============================================================================

/// Which walked interfaces have a device behind them
fn wiring() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..40)
}

fn switch_item(uid: &str, wiring: &[bool]) -> Value {
    let ports: Vec<Value> = wiring
        .iter()
        .enumerate()
        .map(|(i, wired)| if *wired { json!({ "uid": format!("node-{}", i) }) } else { json!({}) })
        .collect();
    json!({ "type": "network_equipment", "uid": uid,
            "linecards": [ { "snmp_pattern": "p%PORT%", "ports": ports } ] })
}

fn walk_of(len: usize) -> LiveInterfaceWalk {
    (0..len).map(|i| format!("p{}", i)).collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: trimmed output ends at the last resolved interface and keeps interior gaps
    #[test]
    fn prop_trim_keeps_interior_gaps(wiring in wiring(), extra in 0usize..5) {
        let doc: TopologyDocument = serde_json::from_value(json!({ "items": [ switch_item("sw1", &wiring) ] })).unwrap();
        let index = build(&doc, "nancy").index;

        let slots = reconcile("sw1", "nancy", &index, &walk_of(wiring.len() + extra));

        let expected_len = wiring.iter().rposition(|w| *w).map(|i| i + 1).unwrap_or(0);
        prop_assert_eq!(slots.len(), expected_len);
        prop_assert!(slots.last().map(|s| s.is_resolved()).unwrap_or(true));

        for (i, slot) in slots.iter().enumerate() {
            prop_assert_eq!(slot.walk_position(), i + 1);
            prop_assert_eq!(slot.is_resolved(), wiring[i]);
        }
    }

    /// Property: positions follow the walk, not the inventory order
    #[test]
    fn prop_positions_follow_walk(wiring in wiring()) {
        let doc: TopologyDocument = serde_json::from_value(json!({ "items": [ switch_item("sw1", &wiring) ] })).unwrap();
        let index = build(&doc, "nancy").index;
        let reversed: LiveInterfaceWalk = (0..wiring.len()).rev().map(|i| format!("p{}", i)).collect();

        let slots = reconcile("sw1", "nancy", &index, &reversed);

        for record in slots.iter().filter_map(|s| s.record()) {
            let port: usize = record.device_name.as_str().trim_start_matches("nancy.node-").parse().unwrap();
            prop_assert_eq!(record.walk_position, wiring.len() - port);
        }
    }

    /// Property: an unreachable switch never hides the probes of the others
    #[test]
    fn prop_unreachable_switches_are_isolated(
        wirings in prop::collection::vec(wiring(), 1..6),
        reachable in prop::collection::vec(any::<bool>(), 6),
    ) {
        let items: Vec<Value> = wirings
            .iter()
            .enumerate()
            .map(|(i, w)| switch_item(&format!("sw{}", i), w))
            .collect();

        let mut walker = FixtureWalker::default();
        let mut expected = 0;
        for (i, w) in wirings.iter().enumerate() {
            if reachable[i] {
                let table: Vec<String> = (0..w.len()).map(|p| format!("p{}", p)).collect();
                let table: Vec<&str> = table.iter().map(String::as_str).collect();
                walker = walker.with_table(&format!("sw{}.nancy.grid5000.fr", i), &table);
                expected += w.iter().filter(|wired| **wired).count();
            }
        }

        let mapper = ProbeMapper::new(FixtureSource::new(json!({ "items": items })), walker, MapperConfig::default());
        let report = tokio_test::block_on(mapper.map_site("nancy")).unwrap();

        prop_assert_eq!(report.probe_count(), expected);
        for switch in &report.switches {
            let i: usize = switch.switch_id.trim_start_matches("sw").parse().unwrap();
            if !reachable[i] {
                prop_assert!(matches!(switch.outcome, SwitchOutcome::Unreachable(_)));
            }
        }
    }
}
