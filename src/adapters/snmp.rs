// Copyright (c) 2025 - Cowboy AI, Inc.

//! SNMP Interface Walk Adapter
//!
//! Walks a column of a switch's interface table and returns the values in the
//! order the agent served them. The default implementation drives the net-snmp
//! `snmpwalk` tool in quick value-only output mode (`-Oqv`), one value per line.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::config::SnmpConfig;

/// Interface description column
pub const IF_DESCR: &str = "IF-MIB::ifDescr";

/// A switch could not be walked
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("failed to run {command}: {reason}")]
    Spawn { command: String, reason: String },

    #[error("walk of {host} did not finish within {secs}s")]
    Timeout { host: String, secs: u64 },

    #[error("walk of {host} failed ({status}): {message}")]
    Failed {
        host: String,
        status: String,
        message: String,
    },

    #[error("{host} has no {oid} table")]
    NoSuchObject { host: String, oid: String },
}

/// Source of live interface tables
#[async_trait]
pub trait InterfaceWalker: Send + Sync {
    /// Values of `oid` on `host`, in agent order
    async fn walk(&self, host: &str, oid: &str) -> Result<Vec<String>, WalkError>;
}

/// Walks switches with the net-snmp command line tool
#[derive(Debug, Clone, Default)]
pub struct SnmpWalkCommand {
    config: SnmpConfig,
}

impl SnmpWalkCommand {
    pub fn new(config: SnmpConfig) -> Self {
        Self { config }
    }

    fn args(&self, host: &str, oid: &str) -> Vec<String> {
        vec![
            "-v".to_string(),
            self.config.version.clone(),
            "-c".to_string(),
            self.config.community.clone(),
            "-t".to_string(),
            self.config.timeout_secs.to_string(),
            "-r".to_string(),
            self.config.retries.to_string(),
            "-Oqv".to_string(),
            host.to_string(),
            oid.to_string(),
        ]
    }
}

#[async_trait]
impl InterfaceWalker for SnmpWalkCommand {
    async fn walk(&self, host: &str, oid: &str) -> Result<Vec<String>, WalkError> {
        debug!("Walking {} on {}", oid, host);

        let child = Command::new(&self.config.command)
            .args(self.args(host, oid))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let deadline = Duration::from_secs(self.config.walk_deadline_secs);
        let output = tokio::time::timeout(deadline, child)
            .await
            .map_err(|_| WalkError::Timeout {
                host: host.to_string(),
                secs: self.config.walk_deadline_secs,
            })?
            .map_err(|e| WalkError::Spawn {
                command: self.config.command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(WalkError::Failed {
                host: host.to_string(),
                status: output.status.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let values = parse_values(&String::from_utf8_lossy(&output.stdout));
        if let [only] = values.as_slice() {
            if only.starts_with("No Such Object") || only.starts_with("No Such Instance") {
                return Err(WalkError::NoSuchObject {
                    host: host.to_string(),
                    oid: oid.to_string(),
                });
            }
        }

        debug!("{} returned {} rows for {}", host, values.len(), oid);
        Ok(values)
    }
}

/// One value per line, surrounding quotes removed; empty lines are kept since positions matter
pub fn parse_values(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| {
            let line = line.trim_end_matches('\r');
            line.strip_prefix('"')
                .and_then(|l| l.strip_suffix('"'))
                .unwrap_or(line)
                .to_string()
        })
        .collect()
}
