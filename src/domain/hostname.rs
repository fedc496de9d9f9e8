// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cluster Host Naming
//!
//! Cluster hosts follow `<host>.<site>.<domain>`, e.g. `fnancy.nancy.grid5000.fr`.
//! Switches are reachable under the same scheme, which is both the SNMP target
//! and the collectd `Address` of every probe on that switch.

/// Site label of a fully qualified host name (the second label)
///
/// ```rust
/// use switchmap::domain::site_from_fqdn;
///
/// assert_eq!(site_from_fqdn("fnancy.nancy.grid5000.fr"), Some("nancy"));
/// assert_eq!(site_from_fqdn("localhost"), None);
/// ```
pub fn site_from_fqdn(fqdn: &str) -> Option<&str> {
    fqdn.split('.').nth(1).filter(|label| !label.is_empty())
}

/// Fully qualified name of a switch
pub fn switch_fqdn(switch_id: &str, site_id: &str, domain_suffix: &str) -> String {
    format!("{}.{}.{}", switch_id, site_id, domain_suffix)
}
