// Copyright (c) 2025 - Cowboy AI, Inc.

//! Probe Reconciliation
//!
//! Matches a switch's live interface table against its slice of the
//! [`TopologyIndex`] and produces one [`ProbeSlot`] per walked interface.
//!
//! Counters are addressed positionally by the monitoring daemon
//! (`IF-MIB::ifHCInOctets.<n>`), so every slot keeps the 1-based position at
//! which its interface appeared in the walk. The walk order is the switch's own
//! interface numbering and is never re-sorted.
//!
//! Trailing unresolved slots (uplinks, unused high-numbered ports) are trimmed.
//! Interior gaps are kept: they are what keeps later positions aligned.
//!
//! # Known limitation
//!
//! Correlation is purely positional. If a switch renumbers its interface table
//! between two runs, the same position can silently refer to another device.

use serde::{Deserialize, Serialize};

use crate::domain::DeviceName;
use crate::index::TopologyIndex;

/// One row of a live `ifDescr` walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceEntry {
    /// Interface description, matched against switch-local addresses
    pub address: String,

    /// 1-based position in the walk
    pub walk_position: usize,
}

/// Ordered interface descriptions of one switch, as returned by the switch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveInterfaceWalk {
    entries: Vec<InterfaceEntry>,
}

impl LiveInterfaceWalk {
    /// Number descriptions 1, 2, 3, ... in the order given
    pub fn from_descriptions<I, S>(descriptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = descriptions
            .into_iter()
            .enumerate()
            .map(|(i, address)| InterfaceEntry {
                address: address.into(),
                walk_position: i + 1,
            })
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterfaceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LiveInterfaceWalk {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_descriptions(iter)
    }
}

/// A monitored device bound to a counter position on a switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub device_name: DeviceName,
    pub walk_position: usize,
    pub switch_id: String,
    pub site_id: String,
}

/// One walked interface, with or without a device behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeSlot {
    Resolved(ProbeRecord),
    Unresolved { walk_position: usize },
}

impl ProbeSlot {
    pub fn walk_position(&self) -> usize {
        match self {
            ProbeSlot::Resolved(record) => record.walk_position,
            ProbeSlot::Unresolved { walk_position } => *walk_position,
        }
    }

    pub fn record(&self) -> Option<&ProbeRecord> {
        match self {
            ProbeSlot::Resolved(record) => Some(record),
            ProbeSlot::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ProbeSlot::Resolved(_))
    }
}

/// Resolve every walked interface of `switch_id` through `index`
///
/// The result never ends with an unresolved slot; it is empty when nothing
/// on the switch resolves.
pub fn reconcile(
    switch_id: &str,
    site_id: &str,
    index: &TopologyIndex,
    walk: &LiveInterfaceWalk,
) -> Vec<ProbeSlot> {
    let mut slots: Vec<ProbeSlot> = walk
        .iter()
        .map(|entry| match index.lookup(switch_id, &entry.address) {
            Some(device_name) => ProbeSlot::Resolved(ProbeRecord {
                device_name: device_name.clone(),
                walk_position: entry.walk_position,
                switch_id: switch_id.to_string(),
                site_id: site_id.to_string(),
            }),
            None => ProbeSlot::Unresolved {
                walk_position: entry.walk_position,
            },
        })
        .collect();

    trim_trailing_unresolved(&mut slots);
    slots
}

/// Pop unresolved slots off the end until the last one is resolved
pub fn trim_trailing_unresolved(slots: &mut Vec<ProbeSlot>) {
    while slots.last().is_some_and(|slot| !slot.is_resolved()) {
        slots.pop();
    }
}

/// Resolved records of a reconciled slot sequence, in walk order
pub fn resolved(slots: &[ProbeSlot]) -> impl Iterator<Item = &ProbeRecord> {
    slots.iter().filter_map(ProbeSlot::record)
}
