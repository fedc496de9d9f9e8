// Copyright (c) 2025 - Cowboy AI, Inc.

//! Error types for probe mapping runs
//!
//! Only the fatal conditions live here. Per-port problems are reported as
//! [`LocalSkip`](crate::index::LocalSkip) diagnostics and unreachable switches
//! as [`WalkError`](crate::adapters::WalkError) outcomes; neither ever aborts a run.

use thiserror::Error;

/// Errors that abort a mapping run before any configuration is written
#[derive(Debug, Error)]
pub enum MapperError {
    /// No site identifier on the command line, in the environment or in the FQDN
    #[error("No site given and none could be derived from the local hostname")]
    MissingSite,

    /// Inventory API could not be reached
    #[error("Inventory API unavailable: {0}")]
    InventoryUnavailable(String),

    /// Inventory API answered with a non-success status
    #[error("Inventory API returned {status}: {body}")]
    InventoryStatus {
        /// HTTP status code
        status: u16,
        /// Response body, for the operator
        body: String,
    },

    /// Inventory document could not be understood
    #[error("Malformed topology document: {0}")]
    MalformedDocument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Writing the generated configuration failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for mapping operations
pub type MapperResult<T> = Result<T, MapperError>;

impl From<serde_json::Error> for MapperError {
    fn from(err: serde_json::Error) -> Self {
        MapperError::MalformedDocument(err.to_string())
    }
}

impl From<reqwest::Error> for MapperError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MapperError::MalformedDocument(err.to_string())
        } else {
            MapperError::InventoryUnavailable(err.to_string())
        }
    }
}
