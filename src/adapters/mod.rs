// Copyright (c) 2025 - Cowboy AI, Inc.

//! Collaborator adapters
//!
//! The mapping core only sees two seams: a [`TopologySource`] that hands over
//! the inventory document of a site, and an [`InterfaceWalker`] that returns a
//! switch's live interface table. This module holds the production
//! implementations of both.

pub mod inventory;
pub mod snmp;

pub use inventory::{InventoryClient, TopologySource};
pub use snmp::{InterfaceWalker, SnmpWalkCommand, WalkError, IF_DESCR};
