// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Domain Models
//!
//! Inventory shapes and the value objects derived from them:
//!
//! - [`TopologyDocument`] - the inventory answer for one site
//! - [`SwitchDevice`], [`Linecard`], [`Port`] - switch hardware as described by the inventory
//! - [`AddressTemplate`] / [`address`] - switch-local port addressing
//! - [`DeviceName`] / [`NamingScheme`] - names of attached devices

pub mod address;
pub mod device_name;
pub mod hostname;
pub mod topology;

pub use address::{address, AddressError, AddressTemplate, LINECARD_PLACEHOLDER, PORT_PLACEHOLDER};
pub use device_name::{DeviceName, NamingScheme};
pub use hostname::{site_from_fqdn, switch_fqdn};
pub use topology::{Linecard, Port, SwitchDevice, TopologyDocument, NETWORK_EQUIPMENT};
