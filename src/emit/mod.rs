// Copyright (c) 2025 - Cowboy AI, Inc.

//! Probe Configuration Emitters
//!
//! Renders reconciled probes as configuration text. Emitters are pure: they
//! only format what they are given and never touch the network or stdout.
//!
//! - [`CollectdEmitter`] - collectd `snmp` plugin blocks, one `Data`/`Host` pair per probe
//! - [`index_dump`] - the raw topology index as JSON, for inspection

pub mod index_dump;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::OutputConfig;
use crate::reconcile::{resolved, ProbeRecord, ProbeSlot};

pub use index_dump::render_index;

/// Renders probes for the collectd `snmp` plugin
#[derive(Debug, Clone, Default)]
pub struct CollectdEmitter {
    config: OutputConfig,
}

impl CollectdEmitter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Stanzas for every resolved slot of one switch, in walk order
    pub fn emit(&self, slots: &[ProbeSlot], switch_id: &str, site_id: &str) -> String {
        let address = self.config.switch_address(switch_id, site_id);
        resolved(slots)
            .map(|record| self.stanza(record, &address))
            .collect()
    }

    fn stanza(&self, record: &ProbeRecord, address: &str) -> String {
        let name = quoted(record.device_name.as_str());
        let data = quoted(&format!("std_traffic_{}", record.device_name));
        let position = record.walk_position;
        format!(
            "<Data {data}>\n\
             \tType \"if_octets\"\n\
             \tTable false\n\
             \tInstance {name}\n\
             \tValues \"IF-MIB::ifHCInOctets.{position}\" \"IF-MIB::ifHCOutOctets.{position}\"\n\
             </Data>\n\
             <Host {name}>\n\
             \tAddress {address}\n\
             \tVersion {version}\n\
             \tCommunity {community}\n\
             \tCollect {data}\n\
             </Host>\n",
            address = quoted(address),
            version = self.config.collectd_version,
            community = quoted(&self.config.collectd_community),
        )
    }

    /// Global settings and the opening of the `snmp` plugin block
    ///
    /// The first line records the site, and the generation time when one is
    /// given. Without it the output only changes when the topology does.
    pub fn header(&self, site_id: &str, generated_at: Option<DateTime<Utc>>) -> String {
        let stamp = generated_at
            .map(|at| format!(" at {}", at.to_rfc3339_opts(SecondsFormat::Secs, true)))
            .unwrap_or_default();
        format!(
            "# Generated by switchmap for site {site_id}{stamp}\n\
             FQDNLookup true\n\
             LoadPlugin syslog\n\
             <Plugin syslog>\n\
             \tLogLevel info\n\
             </Plugin>\n\
             LoadPlugin rrdtool\n\
             LoadPlugin snmp\n\
             <Plugin rrdtool>\n\
             \tDataDir {data_dir}\n\
             </Plugin>\n\
             <Plugin snmp>\n\
             \t<Data \"std_traffic\">\n\
             \t\tType \"if_octets\"\n\
             \t\tTable true\n\
             \t\tInstancePrefix \"traffic\"\n\
             \t\tInstance \"IF-MIB::ifDescr\"\n\
             \t\tValues \"IF-MIB::ifHCInOctets\" \"IF-MIB::ifHCOutOctets\"\n\
             \t</Data>\n",
            data_dir = quoted(&self.config.rrd_data_dir),
        )
    }

    /// Closes the `snmp` plugin block opened by [`header`](Self::header)
    pub fn footer(&self) -> &'static str {
        "</Plugin>\n"
    }
}

/// A collectd string literal; backslashes and double quotes are escaped
fn quoted(value: &str) -> String {
    let mut text = String::with_capacity(value.len() + 2);
    text.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            text.push('\\');
        }
        text.push(c);
    }
    text.push('"');
    text
}

/// Stanzas for `slots` with the default output settings
pub fn emit(slots: &[ProbeSlot], switch_id: &str, site_id: &str) -> String {
    CollectdEmitter::default().emit(slots, switch_id, site_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceName;
    use pretty_assertions::assert_eq;

    fn record(name: &str, walk_position: usize) -> ProbeSlot {
        ProbeSlot::Resolved(ProbeRecord {
            device_name: DeviceName::new(name),
            walk_position,
            switch_id: "sw1".to_string(),
            site_id: "nancy".to_string(),
        })
    }

    #[test]
    fn test_stanza_pair() {
        let text = emit(&[record("gw1.nancy.node-3", 7)], "sw1", "nancy");

        assert_eq!(
            text,
            "<Data \"std_traffic_gw1.nancy.node-3\">\n\
             \tType \"if_octets\"\n\
             \tTable false\n\
             \tInstance \"gw1.nancy.node-3\"\n\
             \tValues \"IF-MIB::ifHCInOctets.7\" \"IF-MIB::ifHCOutOctets.7\"\n\
             </Data>\n\
             <Host \"gw1.nancy.node-3\">\n\
             \tAddress \"sw1.nancy.grid5000.fr\"\n\
             \tVersion 2\n\
             \tCommunity \"public\"\n\
             \tCollect \"std_traffic_gw1.nancy.node-3\"\n\
             </Host>\n"
        );
    }

    #[test]
    fn test_unresolved_slots_are_skipped() {
        let slots = vec![
            record("nancy.a", 1),
            ProbeSlot::Unresolved { walk_position: 2 },
            record("nancy.c", 3),
        ];
        let text = emit(&slots, "sw1", "nancy");

        assert_eq!(text.matches("<Data ").count(), 2);
        assert!(text.contains("IF-MIB::ifHCInOctets.3"));
        assert!(!text.contains("IF-MIB::ifHCInOctets.2"));
    }

    #[test]
    fn test_custom_output_settings() {
        let emitter = CollectdEmitter::new(OutputConfig {
            domain_suffix: "example.net".to_string(),
            collectd_version: 1,
            collectd_community: "secret".to_string(),
            ..Default::default()
        });
        let text = emitter.emit(&[record("nancy.a", 4)], "sw9", "lyon");

        assert!(text.contains("\tAddress \"sw9.lyon.example.net\"\n"));
        assert!(text.contains("\tVersion 1\n"));
        assert!(text.contains("\tCommunity \"secret\"\n"));
    }

    #[test]
    fn test_header_and_footer() {
        let emitter = CollectdEmitter::default();
        let stamp = DateTime::parse_from_rfc3339("2026-01-19T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let header = emitter.header("nancy", Some(stamp));

        assert!(header.starts_with("# Generated by switchmap for site nancy at 2026-01-19T12:00:00Z\n"));
        assert!(header.contains("\tDataDir \"/var/lib/collectd/rrd\"\n"));
        assert!(header.ends_with("\t</Data>\n"));
        assert_eq!(emitter.footer(), "</Plugin>\n");
    }

    #[test]
    fn test_header_is_stable_without_timestamp() {
        let emitter = CollectdEmitter::default();
        let header = emitter.header("nancy", None);

        assert!(header.starts_with("# Generated by switchmap for site nancy\nFQDNLookup true\n"));
        assert_eq!(header, emitter.header("nancy", None));
    }

    #[test]
    fn test_names_are_escaped() {
        let text = emit(&[record(r#"nancy.we"ird\node"#, 2)], "sw1", "nancy");

        assert!(text.starts_with("<Data \"std_traffic_nancy.we\\\"ird\\\\node\">\n"));
        assert!(text.contains("\tInstance \"nancy.we\\\"ird\\\\node\"\n"));
        assert!(text.contains("<Host \"nancy.we\\\"ird\\\\node\">\n"));
        assert!(text.contains("\tCollect \"std_traffic_nancy.we\\\"ird\\\\node\"\n"));
    }

    #[test]
    fn test_nothing_resolved_emits_nothing() {
        assert_eq!(emit(&[], "sw1", "nancy"), "");
    }
}
