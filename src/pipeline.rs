// Copyright (c) 2025 - Cowboy AI, Inc.

//! Mapping Pipeline
//!
//! Runs the whole mapping for one site:
//!
//! ```text
//! fetch document ──> build index ──> for each switch, in discovery order:
//!     (fatal)          (LocalSkip)        walk ifDescr ──> reconcile ──> slots
//!                                         (SwitchUnreachable: skip switch)
//! ```
//!
//! Switches are walked one at a time. The index is built completely before the
//! first walk and only read afterwards. Rendering happens on the finished
//! [`MappingReport`], so nothing is written while switches are still being walked.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adapters::{InterfaceWalker, TopologySource, IF_DESCR};
use crate::config::MapperConfig;
use crate::emit::{render_index, CollectdEmitter};
use crate::errors::MapperResult;
use crate::index::{IndexBuild, IndexBuilder, LocalSkip, TopologyIndex};
use crate::reconcile::{reconcile, LiveInterfaceWalk, ProbeSlot};

/// What happened to one switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SwitchOutcome {
    /// Number of resolved probes
    Probes(usize),

    /// Reachable, but nothing on it resolves to a device
    NoProbes,

    /// Walk failed; the switch contributes nothing
    Unreachable(String),

    /// Left out by configuration
    Excluded,
}

/// Result of mapping one switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchReport {
    pub switch_id: String,
    pub outcome: SwitchOutcome,

    /// Trimmed slots, empty unless the outcome is `Probes`
    pub slots: Vec<ProbeSlot>,
}

/// Result of mapping one site
#[derive(Debug, Clone)]
pub struct MappingReport {
    pub site_id: String,
    pub index: TopologyIndex,
    pub diagnostics: Vec<LocalSkip>,
    pub switches: Vec<SwitchReport>,
}

impl MappingReport {
    /// Resolved probes across all switches
    pub fn probe_count(&self) -> usize {
        self.switches
            .iter()
            .map(|s| match s.outcome {
                SwitchOutcome::Probes(n) => n,
                _ => 0,
            })
            .sum()
    }

    /// Switches that could not be walked
    pub fn unreachable(&self) -> impl Iterator<Item = &SwitchReport> {
        self.switches
            .iter()
            .filter(|s| matches!(s.outcome, SwitchOutcome::Unreachable(_)))
    }

    /// The collectd configuration for every mapped switch
    ///
    /// `generated_at` only goes into the header comment when given.
    pub fn render_collectd(
        &self,
        emitter: &CollectdEmitter,
        include_header: bool,
        generated_at: Option<DateTime<Utc>>,
    ) -> String {
        let mut text = String::new();
        if include_header {
            text.push_str(&emitter.header(&self.site_id, generated_at));
        }
        for switch in &self.switches {
            text.push_str(&emitter.emit(&switch.slots, &switch.switch_id, &self.site_id));
        }
        if include_header {
            text.push_str(emitter.footer());
        }
        text
    }
}

/// Maps a site's switch counters to the devices behind them
pub struct ProbeMapper<S, W> {
    source: S,
    walker: W,
    config: MapperConfig,
}

impl<S: TopologySource, W: InterfaceWalker> ProbeMapper<S, W> {
    pub fn new(source: S, walker: W, config: MapperConfig) -> Self {
        Self {
            source,
            walker,
            config,
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Fetch the inventory of `site_id` and index it
    pub async fn build_index(&self, site_id: &str) -> MapperResult<IndexBuild> {
        let doc = self.source.fetch_network_equipments(site_id).await?;
        info!(
            "Fetched {} inventory items for {} from {}",
            doc.items.len(),
            site_id,
            self.source.name()
        );

        let build = IndexBuilder::new(site_id)
            .with_naming(self.config.output.naming)
            .with_unassigned(self.config.output.record_unassigned)
            .build(&doc);

        info!(
            "Indexed {} switches, {} ports ({} skipped)",
            build.index.len(),
            build.index.port_count(),
            build.diagnostics.len()
        );
        Ok(build)
    }

    /// Pretty JSON of the index of `site_id`; no switch is contacted
    pub async fn dump_index(&self, site_id: &str) -> MapperResult<String> {
        let build = self.build_index(site_id).await?;
        render_index(&build.index)
    }

    /// Index `site_id`, then walk and reconcile each indexed switch
    pub async fn map_site(&self, site_id: &str) -> MapperResult<MappingReport> {
        let IndexBuild { index, diagnostics } = self.build_index(site_id).await?;

        let mut switches = Vec::with_capacity(index.len());
        for switch_id in index.switch_ids() {
            let report = self.map_switch(switch_id, site_id, &index).await;
            switches.push(report);
        }

        Ok(MappingReport {
            site_id: site_id.to_string(),
            index,
            diagnostics,
            switches,
        })
    }

    async fn map_switch(&self, switch_id: &str, site_id: &str, index: &TopologyIndex) -> SwitchReport {
        let report = |outcome: SwitchOutcome, slots: Vec<ProbeSlot>| SwitchReport {
            switch_id: switch_id.to_string(),
            outcome,
            slots,
        };

        if self.config.output.is_excluded(switch_id) {
            warn!("Ignore switch: {}", switch_id);
            return report(SwitchOutcome::Excluded, Vec::new());
        }

        let host = self.config.output.switch_address(switch_id, site_id);
        let walk = match self.walker.walk(&host, IF_DESCR).await {
            Ok(descriptions) => LiveInterfaceWalk::from_descriptions(descriptions),
            Err(e) => {
                warn!("Skipping switch {}: {}", switch_id, e);
                return report(SwitchOutcome::Unreachable(e.to_string()), Vec::new());
            }
        };

        let slots = reconcile(switch_id, site_id, index, &walk);
        let resolved = slots.iter().filter(|s| s.is_resolved()).count();
        if resolved == 0 {
            debug!("No probes on switch {} ({} interfaces walked)", switch_id, walk.len());
            return report(SwitchOutcome::NoProbes, Vec::new());
        }

        info!(
            "{}: {} probes over {} of {} interfaces",
            switch_id,
            resolved,
            slots.len(),
            walk.len()
        );
        report(SwitchOutcome::Probes(resolved), slots)
    }
}
