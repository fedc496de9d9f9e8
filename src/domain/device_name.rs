// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Name Value Object
//!
//! The name under which an attached device shows up in the monitoring
//! configuration. It becomes part of collectd `Data`/`Host` block names and of
//! the on-disk RRD paths, so it has to be stable across runs for a given port.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a device attached to a switch port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceName(String);

impl DeviceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DeviceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeviceName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// How device names are composed from the inventory fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingScheme {
    /// `<site>.<device>[-<port>]`
    #[default]
    SiteQualified,

    /// `<device>[-<port>]_<switch>`
    SwitchSuffixed,
}

impl NamingScheme {
    /// Compose the name of `device_id` (optionally `device_port` on it) seen on `switch_id`
    ///
    /// ```rust
    /// use switchmap::domain::NamingScheme;
    ///
    /// let name = NamingScheme::SiteQualified.compose("nancy", "gw1", "graphene-3", Some("eth1"));
    /// assert_eq!(name.as_str(), "nancy.graphene-3-eth1");
    ///
    /// let name = NamingScheme::SwitchSuffixed.compose("nancy", "gw1", "graphene-3", None);
    /// assert_eq!(name.as_str(), "graphene-3_gw1");
    /// ```
    pub fn compose(
        &self,
        site_id: &str,
        switch_id: &str,
        device_id: &str,
        device_port: Option<&str>,
    ) -> DeviceName {
        let suffix = device_port.map(|p| format!("-{}", p)).unwrap_or_default();
        match self {
            NamingScheme::SiteQualified => {
                DeviceName(format!("{}.{}{}", site_id, device_id, suffix))
            }
            NamingScheme::SwitchSuffixed => {
                DeviceName(format!("{}{}_{}", device_id, suffix, switch_id))
            }
        }
    }
}

impl fmt::Display for NamingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingScheme::SiteQualified => write!(f, "site-qualified"),
            NamingScheme::SwitchSuffixed => write!(f, "switch-suffixed"),
        }
    }
}

impl FromStr for NamingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "site-qualified" => Ok(NamingScheme::SiteQualified),
            "switch-suffixed" => Ok(NamingScheme::SwitchSuffixed),
            other => Err(format!(
                "unknown naming scheme '{}' (expected site-qualified or switch-suffixed)",
                other
            )),
        }
    }
}
