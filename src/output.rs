// Copyright (c) 2025 - Cowboy AI, Inc.

//! Configuration output
//!
//! The configuration is written in a single write once every switch has been
//! processed, either to a file or to stdout.

use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::errors::MapperResult;

/// Write `text` to `path`, or to stdout when no path is given
pub async fn write_configuration(text: &str, path: Option<&Path>) -> MapperResult<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, text).await?;
            debug!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
