// Copyright (c) 2025 - Cowboy AI, Inc.
//! switchmap - collectd SNMP probes named after the devices behind each switch port
//!
//! Reads the network equipment of a site from the inventory API, walks
//! `IF-MIB::ifDescr` on every switch found and prints a collectd configuration
//! with one traffic probe per attached device.
//!
//! Run with: cargo run --bin switchmap -- --site nancy > /etc/collectd/collectd.conf
//!
//! Diagnostics go to stderr, the configuration to stdout (or `--output`).

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;
use switchmap::{
    adapters::{InventoryClient, SnmpWalkCommand},
    config::{resolve_site, InventoryConfig, MapperConfig, OutputConfig, SnmpConfig},
    domain::NamingScheme,
    emit::CollectdEmitter,
    write_configuration, ProbeMapper,
};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// collectd configuration
    Collectd,
    /// Raw topology index as JSON, without walking any switch
    Index,
}

#[derive(Debug, Parser)]
#[command(name = "switchmap")]
#[command(about = "Generate collectd SNMP probes mapping switch ports to cluster devices", long_about = None)]
#[command(version)]
struct Cli {
    /// The site to configure (defaults to the site of the local host)
    #[arg(short, long, env = "SWITCHMAP_SITE")]
    site: Option<String>,

    /// Inventory API root
    #[arg(long, env = "SWITCHMAP_API_URL", default_value = "https://api.grid5000.fr/stable/")]
    api_url: String,

    #[arg(long, env = "SWITCHMAP_API_USER")]
    api_user: Option<String>,

    #[arg(long, env = "SWITCHMAP_API_PASSWORD", hide_env_values = true)]
    api_password: Option<String>,

    /// Accept invalid TLS certificates from the inventory API
    #[arg(long)]
    insecure: bool,

    /// Inventory request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    api_timeout: u64,

    /// net-snmp walk command
    #[arg(long, env = "SWITCHMAP_SNMPWALK", default_value = "snmpwalk")]
    snmpwalk: String,

    #[arg(long, default_value = "2c")]
    snmp_version: String,

    /// Community used to walk the switches and written into the probes
    #[arg(long, default_value = "public")]
    community: String,

    /// Per-request SNMP timeout, in seconds
    #[arg(long, default_value_t = 5)]
    snmp_timeout: u64,

    #[arg(long, default_value_t = 1)]
    snmp_retries: u32,

    /// Domain appended to `<switch>.<site>`
    #[arg(long, default_value = "grid5000.fr")]
    domain: String,

    /// Device naming scheme: site-qualified or switch-suffixed
    #[arg(long, default_value_t = NamingScheme::SiteQualified)]
    naming: NamingScheme,

    /// Keep ports with nothing attached in the index
    #[arg(long)]
    record_unassigned: bool,

    /// Do not walk switches whose id ends with this suffix (repeatable)
    #[arg(long = "exclude-suffix", value_name = "SUFFIX")]
    exclude_suffixes: Vec<String>,

    #[arg(long, value_enum, default_value_t = Format::Collectd)]
    format: Format,

    /// Only print the probe blocks, without the collectd preamble
    #[arg(long)]
    no_header: bool,

    /// Record the generation time in the header comment
    #[arg(long)]
    timestamp: bool,

    /// Write the configuration to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> MapperConfig {
        MapperConfig {
            inventory: InventoryConfig {
                base_url: self.api_url.clone(),
                user: self.api_user.clone(),
                password: self.api_password.clone(),
                accept_invalid_certs: self.insecure,
                timeout_secs: self.api_timeout,
            },
            snmp: SnmpConfig {
                command: self.snmpwalk.clone(),
                version: self.snmp_version.clone(),
                community: self.community.clone(),
                timeout_secs: self.snmp_timeout,
                retries: self.snmp_retries,
                ..Default::default()
            },
            output: OutputConfig {
                domain_suffix: self.domain.clone(),
                collectd_community: self.community.clone(),
                naming: self.naming,
                record_unassigned: self.record_unassigned,
                excluded_suffixes: self.exclude_suffixes.clone(),
                include_header: !self.no_header,
                ..Default::default()
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let site = match resolve_site(cli.site.as_deref()) {
        Ok(site) => site,
        Err(e) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, format!("{} (use -s SITE)", e))
            .exit(),
    };

    let config = cli.config();
    info!("📋 Mapping site {} from {}", site, config.inventory.base_url);

    let source = InventoryClient::new(config.inventory.clone())
        .context("Failed to create inventory client")?;
    let walker = SnmpWalkCommand::new(config.snmp.clone());
    let mapper = ProbeMapper::new(source, walker, config);

    let text = match cli.format {
        Format::Index => mapper
            .dump_index(&site)
            .await
            .context("Failed to index network equipments")?,
        Format::Collectd => {
            let report = mapper
                .map_site(&site)
                .await
                .context("Failed to map network equipments")?;

            for switch in report.unreachable() {
                warn!("⚠️ No probes for unreachable switch {}", switch.switch_id);
            }
            info!(
                "📊 {} probes on {} switches ({} skipped inventory units)",
                report.probe_count(),
                report.switches.len(),
                report.diagnostics.len()
            );

            let output = &mapper.config().output;
            report.render_collectd(
                &CollectdEmitter::new(output.clone()),
                output.include_header,
                cli.timestamp.then(Utc::now),
            )
        }
    };

    write_configuration(&text, cli.output.as_deref())
        .await
        .context("Failed to write configuration")?;
    if let Some(path) = &cli.output {
        info!("✅ Configuration written to {}", path.display());
    }

    Ok(())
}
