// Copyright (c) 2025 - Cowboy AI, Inc.

//! Mapping run configuration

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{site_from_fqdn, switch_fqdn, NamingScheme};
use crate::errors::{MapperError, MapperResult};

/// Inventory REST API connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// API root, resources are resolved against it (e.g. "https://api.grid5000.fr/stable/")
    pub base_url: String,

    /// Basic-auth user, when the API is reached from outside the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Accept self-signed certificates
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.grid5000.fr/stable/".to_string(),
            user: None,
            password: None,
            accept_invalid_certs: false,
            timeout_secs: default_timeout(),
        }
    }
}

/// How switches are walked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnmpConfig {
    /// net-snmp walk tool
    pub command: String,

    /// Protocol version as net-snmp spells it ("1", "2c")
    pub version: String,

    pub community: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub retries: u32,

    /// Upper bound for a whole table walk, in seconds
    pub walk_deadline_secs: u64,
}

impl Default for SnmpConfig {
    fn default() -> Self {
        Self {
            command: "snmpwalk".to_string(),
            version: "2c".to_string(),
            community: "public".to_string(),
            timeout_secs: 5,
            retries: 1,
            walk_deadline_secs: 120,
        }
    }
}

/// What the generated configuration looks like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Appended to `<switch>.<site>` to form switch addresses
    pub domain_suffix: String,

    /// SNMP version written into collectd `Host` blocks
    pub collectd_version: u8,

    /// Read community written into collectd `Host` blocks
    pub collectd_community: String,

    /// Where collectd keeps its RRD files
    pub rrd_data_dir: String,

    pub naming: NamingScheme,

    /// Keep ports with nothing attached in the index
    #[serde(default)]
    pub record_unassigned: bool,

    /// Switches whose id ends with one of these are not walked
    #[serde(default)]
    pub excluded_suffixes: Vec<String>,

    /// Emit the collectd preamble and closing `</Plugin>`
    pub include_header: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            domain_suffix: "grid5000.fr".to_string(),
            collectd_version: 2,
            collectd_community: "public".to_string(),
            rrd_data_dir: "/var/lib/collectd/rrd".to_string(),
            naming: NamingScheme::default(),
            record_unassigned: false,
            excluded_suffixes: Vec::new(),
            include_header: true,
        }
    }
}

impl OutputConfig {
    /// Network address of a switch
    pub fn switch_address(&self, switch_id: &str, site_id: &str) -> String {
        switch_fqdn(switch_id, site_id, &self.domain_suffix)
    }

    /// Whether a switch is left out of the walk
    pub fn is_excluded(&self, switch_id: &str) -> bool {
        switch_id.is_empty()
            || self
                .excluded_suffixes
                .iter()
                .any(|suffix| !suffix.is_empty() && switch_id.ends_with(suffix.as_str()))
    }
}

/// Configuration of a full mapping run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    #[serde(default)]
    pub inventory: InventoryConfig,

    #[serde(default)]
    pub snmp: SnmpConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Site to map: the explicit one, else the second label of the local host name
pub fn resolve_site(explicit: Option<&str>) -> MapperResult<String> {
    let local = hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok());
    resolve_site_with(explicit, local.as_deref())
}

fn resolve_site_with(explicit: Option<&str>, local_fqdn: Option<&str>) -> MapperResult<String> {
    if let Some(site) = explicit.filter(|s| !s.is_empty()) {
        return Ok(site.to_string());
    }
    let site = local_fqdn
        .and_then(site_from_fqdn)
        .ok_or(MapperError::MissingSite)?;
    debug!("Site {} derived from local host name", site);
    Ok(site.to_string())
}
