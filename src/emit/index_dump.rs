// Copyright (c) 2025 - Cowboy AI, Inc.
//! Raw index rendering, for checking what the inventory resolves to without touching any switch

use crate::errors::MapperResult;
use crate::index::TopologyIndex;

/// Pretty JSON of `index`: `{ "<switch>": { "<address>": "<device>" | null } }`
pub fn render_index(index: &TopologyIndex) -> MapperResult<String> {
    let mut text = serde_json::to_string_pretty(index)?;
    text.push('\n');
    Ok(text)
}
