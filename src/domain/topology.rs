// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Topology Document
//!
//! Shapes of the `network_equipments` resource served by the inventory API:
//!
//! ```text
//! { "items": [
//!     { "type": "network_equipment", "uid": "gw-nancy",
//!       "linecards": [
//!         { "snmp_pattern": "GigabitEthernet%LINECARD%/%PORT%",
//!           "ports": [ { "uid": "graphene-1", "port": "eth0", "kind": "node" }, {} ] } ] } ] }
//! ```
//!
//! Items are kept as raw JSON until they are known to be network equipment, so
//! that unrelated inventory kinds can carry any shape without failing the parse.
//! Linecards and ports stay raw inside a switch for the same reason: each one
//! is parsed on its own, so a bad entry is a per-linecard or per-port
//! diagnostic and never costs the rest of the switch.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Kind discriminator of inventory items that describe switches
pub const NETWORK_EQUIPMENT: &str = "network_equipment";

/// Port kind assumed when the inventory does not say
pub const DEFAULT_PORT_KIND: &str = "node";

/// The full inventory answer for one site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyDocument {
    pub items: Vec<Value>,
}

impl TopologyDocument {
    /// Iterate over the network equipment items, in document order
    ///
    /// Yields the item position alongside the parse result of each switch so
    /// callers can report which item was malformed.
    pub fn switches(&self) -> impl Iterator<Item = (usize, Result<SwitchDevice, serde_json::Error>)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.get("type").and_then(Value::as_str) == Some(NETWORK_EQUIPMENT))
            .map(|(position, item)| (position, SwitchDevice::deserialize(item)))
    }
}

/// A switch and its linecards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchDevice {
    pub uid: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub linecards: Vec<Value>,
}

impl SwitchDevice {
    /// Linecards in inventory order, each parsed independently
    pub fn linecards(&self) -> impl Iterator<Item = (usize, Result<Linecard, serde_json::Error>)> + '_ {
        self.linecards
            .iter()
            .enumerate()
            .map(|(l, linecard)| (l, Linecard::deserialize(linecard)))
    }
}

/// An addressable group of ports on a switch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Linecard {
    /// Address template with `%LINECARD%` and `%PORT%` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snmp_pattern: Option<Value>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub ports: Vec<Value>,
}

impl Linecard {
    /// Ports in inventory order, each parsed independently
    pub fn ports(&self) -> impl Iterator<Item = (usize, Result<Port, serde_json::Error>)> + '_ {
        self.ports
            .iter()
            .enumerate()
            .map(|(p, port)| (p, Port::deserialize(port)))
    }
}

/// A physical switch port and whatever is plugged into it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Attached device identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Value>,

    /// Port on the attached device, when it has several
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<Value>,

    /// Kind of the attached device; only informative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
}

impl Port {
    /// Kind of the attached device, `node` unless stated
    pub fn kind(&self) -> &str {
        self.kind
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PORT_KIND)
    }

    /// Attached device id, `Ok(None)` when nothing is plugged in
    pub fn attached_device_id(&self) -> Result<Option<String>, String> {
        scalar_text(self.uid.as_ref(), "uid")
    }

    /// Sub-port on the attached device
    pub fn attached_device_port(&self) -> Result<Option<String>, String> {
        scalar_text(self.port.as_ref(), "port")
    }
}

/// Render a JSON scalar the way the inventory means it; empty strings count as absent
fn scalar_text(value: Option<&Value>, field: &str) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(format!("'{}' is not a string or number: {}", field, other)),
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
