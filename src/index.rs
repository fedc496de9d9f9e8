// Copyright (c) 2025 - Cowboy AI, Inc.

//! Topology Index - switch port address → attached device
//!
//! The index is built once per site from the inventory document and is
//! read-only afterwards. Reconciliation of a switch only ever reads that
//! switch's slice, so it can be shared by reference across any number of
//! reconciliations.
//!
//! # Building
//!
//! ```text
//! for switch in network_equipment items:
//!     for (l, linecard) in linecards:          // malformed or no template → LocalSkip, next linecard
//!         for (p, port) in linecard.ports:
//!             address = template(l, p)
//!             index[switch][address] = device  // malformed port → LocalSkip, next port
//! ```
//!
//! Building never fails as a whole. Every unit that cannot be indexed is
//! reported as a [`LocalSkip`] in [`IndexBuild::diagnostics`] and the rest of
//! the topology is indexed regardless.
//!
//! Two ports producing the same address overwrite each other: the later port
//! in iteration order wins, while the entry keeps its first insertion position.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{AddressTemplate, DeviceName, NamingScheme, Port, SwitchDevice, TopologyDocument};

/// What the inventory says is plugged into a port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortAssignment {
    /// A named device
    Device(DeviceName),

    /// Nothing; only recorded when the builder is asked to keep empty ports
    Unassigned,
}

impl PortAssignment {
    pub fn device(&self) -> Option<&DeviceName> {
        match self {
            PortAssignment::Device(name) => Some(name),
            PortAssignment::Unassigned => None,
        }
    }
}

/// Per-switch map from switch-local address to port assignment
pub type SwitchPorts = IndexMap<String, PortAssignment>;

/// Read-only index from switch id to its port assignments
///
/// Switches are kept in discovery order, which is the order they are walked in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopologyIndex {
    switches: IndexMap<String, SwitchPorts>,
}

impl TopologyIndex {
    /// Device plugged into `address` on `switch_id`, if any
    pub fn lookup(&self, switch_id: &str, address: &str) -> Option<&DeviceName> {
        self.switches
            .get(switch_id)
            .and_then(|ports| ports.get(address))
            .and_then(PortAssignment::device)
    }

    /// Port assignments of one switch
    pub fn ports(&self, switch_id: &str) -> Option<&SwitchPorts> {
        self.switches.get(switch_id)
    }

    /// Switch ids in discovery order
    pub fn switch_ids(&self) -> impl Iterator<Item = &str> {
        self.switches.keys().map(String::as_str)
    }

    pub fn contains_switch(&self, switch_id: &str) -> bool {
        self.switches.contains_key(switch_id)
    }

    /// Number of indexed switches
    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }

    /// Total number of indexed ports across all switches
    pub fn port_count(&self) -> usize {
        self.switches.values().map(IndexMap::len).sum()
    }

    fn insert(&mut self, switch_id: &str, address: String, assignment: PortAssignment) {
        self.switches
            .entry(switch_id.to_string())
            .or_default()
            .insert(address, assignment);
    }
}

/// A unit of the topology that could not be indexed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalSkip {
    /// A network equipment item that is not shaped like a switch
    #[error("Can't read network equipment item #{item}: {reason}")]
    MalformedSwitch { item: usize, reason: String },

    /// Linecard entry that is not shaped like a linecard
    #[error("Can't read linecard {switch_id}:{linecard}: {reason}")]
    MalformedLinecard {
        switch_id: String,
        linecard: usize,
        reason: String,
    },

    /// Linecard without an address template
    #[error("No pattern for {switch_id}:{linecard}")]
    MissingAddressTemplate { switch_id: String, linecard: usize },

    /// Port whose address or device name could not be computed
    #[error("Can't write {switch_id}:{template}:{linecard}:{port}:{} : {reason}", .attached_device_id.as_deref().unwrap_or("None"))]
    MalformedPort {
        switch_id: String,
        template: String,
        linecard: usize,
        port: usize,
        attached_device_id: Option<String>,
        reason: String,
    },
}

/// Outcome of indexing one site
#[derive(Debug, Clone, Default)]
pub struct IndexBuild {
    pub index: TopologyIndex,
    pub diagnostics: Vec<LocalSkip>,
}

/// Builds a [`TopologyIndex`] from a topology document
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    site_id: String,
    naming: NamingScheme,
    record_unassigned: bool,
}

impl IndexBuilder {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            naming: NamingScheme::default(),
            record_unassigned: false,
        }
    }

    /// Set how device names are composed
    pub fn with_naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    /// Also record ports with nothing attached, as [`PortAssignment::Unassigned`]
    pub fn with_unassigned(mut self, record_unassigned: bool) -> Self {
        self.record_unassigned = record_unassigned;
        self
    }

    /// Index every network equipment item of `doc`
    pub fn build(&self, doc: &TopologyDocument) -> IndexBuild {
        let mut build = IndexBuild::default();

        for (item, parsed) in doc.switches() {
            match parsed {
                Ok(switch) => self.index_switch(&switch, &mut build),
                Err(e) => report(
                    &mut build.diagnostics,
                    LocalSkip::MalformedSwitch {
                        item,
                        reason: e.to_string(),
                    },
                ),
            }
        }

        debug!(
            "Indexed {} ports on {} switches ({} skipped units)",
            build.index.port_count(),
            build.index.len(),
            build.diagnostics.len()
        );
        build
    }

    fn index_switch(&self, switch: &SwitchDevice, build: &mut IndexBuild) {
        for (l, parsed) in switch.linecards() {
            let linecard = match parsed {
                Ok(linecard) => linecard,
                Err(e) => {
                    report(
                        &mut build.diagnostics,
                        LocalSkip::MalformedLinecard {
                            switch_id: switch.uid.clone(),
                            linecard: l,
                            reason: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            let Some(raw_template) = linecard.snmp_pattern.as_ref().filter(|v| !v.is_null()) else {
                report(
                    &mut build.diagnostics,
                    LocalSkip::MissingAddressTemplate {
                        switch_id: switch.uid.clone(),
                        linecard: l,
                    },
                );
                continue;
            };

            for (p, parsed) in linecard.ports() {
                let indexed = AddressTemplate::from_value(raw_template)
                    .map_err(|e| e.to_string())
                    .and_then(|template| {
                        let port = parsed.as_ref().map_err(|e| e.to_string())?;
                        let assignment = self.assignment(&switch.uid, port)?;
                        Ok((template.address(l, p), assignment, port.kind()))
                    });

                match indexed {
                    Ok((address, Some(assignment), kind)) => {
                        debug!("{}:{} -> {:?} ({})", switch.uid, address, assignment, kind);
                        build.index.insert(&switch.uid, address, assignment);
                    }
                    Ok((_, None, _)) => {}
                    Err(reason) => report(
                        &mut build.diagnostics,
                        LocalSkip::MalformedPort {
                            switch_id: switch.uid.clone(),
                            template: template_text(raw_template),
                            linecard: l,
                            port: p,
                            attached_device_id: linecard
                                .ports
                                .get(p)
                                .and_then(|raw| raw.get("uid"))
                                .filter(|v| !v.is_null())
                                .map(template_text),
                            reason,
                        },
                    ),
                }
            }
        }
    }

    /// What to record for `port`; `None` means the port is left out of the index
    fn assignment(&self, switch_id: &str, port: &Port) -> Result<Option<PortAssignment>, String> {
        let Some(device_id) = port.attached_device_id()? else {
            return Ok(self.record_unassigned.then_some(PortAssignment::Unassigned));
        };
        let device_port = port.attached_device_port()?;
        let name = self
            .naming
            .compose(&self.site_id, switch_id, &device_id, device_port.as_deref());
        Ok(Some(PortAssignment::Device(name)))
    }
}

/// Index `doc` for `site_id` with the default naming scheme
pub fn build(doc: &TopologyDocument, site_id: &str) -> IndexBuild {
    IndexBuilder::new(site_id).build(doc)
}

fn report(diagnostics: &mut Vec<LocalSkip>, skip: LocalSkip) {
    warn!("{}", skip);
    diagnostics.push(skip);
}

fn template_text(value: &serde_json::Value) -> String {
    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}
