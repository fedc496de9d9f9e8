// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for switchmap
//!
//! Provides a deterministic site inventory and in-memory collaborators so the
//! pipeline can be exercised without an inventory API or real switches.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use switchmap::adapters::{InterfaceWalker, TopologySource, WalkError};
use switchmap::domain::TopologyDocument;
use switchmap::MapperResult;

pub const SITE: &str = "nancy";

/// Two switches and a PDU:
///
/// - `gw-nancy`: linecard 0 without pattern, linecard 1 `Te%LINECARD%/%PORT%`
///   with graphene-1, (empty), graphene-3 (eth1)
/// - `sgraphene1`: `Gi0/%PORT%` with griffon-10, griffon-11
pub fn nancy_topology() -> Value {
    json!({
        "total": 3,
        "items": [
            {
                "type": "network_equipment",
                "uid": "gw-nancy",
                "kind": "router",
                "linecards": [
                    { "kind": "ethernet", "ports": [ { "uid": "unreachable-node" } ] },
                    {
                        "snmp_pattern": "Te%LINECARD%/%PORT%",
                        "ports": [
                            { "uid": "graphene-1", "kind": "node" },
                            {},
                            { "uid": "graphene-3", "port": "eth1" }
                        ]
                    }
                ]
            },
            { "type": "pdu", "uid": "grimani-pdu1", "sensors": [ { "power": {} } ] },
            {
                "type": "network_equipment",
                "uid": "sgraphene1",
                "linecards": [
                    {
                        "snmp_pattern": "Gi0/%PORT%",
                        "ports": [ { "uid": "griffon-10" }, { "uid": "griffon-11" } ]
                    }
                ]
            }
        ]
    })
}

pub fn nancy_document() -> TopologyDocument {
    serde_json::from_value(nancy_topology()).expect("Invalid topology fixture")
}

/// Serves a fixed document and counts fetches
pub struct FixtureSource {
    document: Value,
    pub fetches: Mutex<Vec<String>>,
}

impl FixtureSource {
    pub fn new(document: Value) -> Self {
        Self {
            document,
            fetches: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TopologySource for FixtureSource {
    async fn fetch_network_equipments(&self, site_id: &str) -> MapperResult<TopologyDocument> {
        self.fetches.lock().unwrap().push(site_id.to_string());
        Ok(serde_json::from_value(self.document.clone())?)
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

/// Answers walks from a host → descriptions table; unknown hosts time out
#[derive(Default)]
pub struct FixtureWalker {
    tables: HashMap<String, Vec<String>>,
    walked: Arc<Mutex<Vec<String>>>,
}

impl FixtureWalker {
    /// Hosts walked so far, shared with the walker
    pub fn walk_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.walked)
    }

    pub fn with_table(mut self, host: &str, descriptions: &[&str]) -> Self {
        self.tables.insert(
            host.to_string(),
            descriptions.iter().map(|d| d.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl InterfaceWalker for FixtureWalker {
    async fn walk(&self, host: &str, _oid: &str) -> Result<Vec<String>, WalkError> {
        self.walked.lock().unwrap().push(host.to_string());
        self.tables.get(host).cloned().ok_or_else(|| WalkError::Timeout {
            host: host.to_string(),
            secs: 5,
        })
    }
}
