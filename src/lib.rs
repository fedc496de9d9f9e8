//! Switch counter to device mapping for cluster monitoring
//!
//! This crate discovers which device sits behind each switch port, using the
//! cluster inventory API, and cross-references it with the live SNMP interface
//! table of every switch to produce collectd `snmp` plugin probes that name
//! each traffic counter after the device it measures.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod emit;
pub mod errors;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod reconcile;

// Re-export commonly used types
pub use config::MapperConfig;
pub use errors::{MapperError, MapperResult};
pub use index::{IndexBuild, IndexBuilder, LocalSkip, TopologyIndex};
pub use output::write_configuration;
pub use pipeline::{MappingReport, ProbeMapper, SwitchOutcome};
pub use reconcile::{reconcile, LiveInterfaceWalk, ProbeRecord, ProbeSlot};
