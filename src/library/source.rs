//! Loading a container snapshot from disk
//!
//! The snapshot is a JSON array holding the container's entries in order.
//! A path of `-` reads the snapshot from stdin.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::models::ContainerEntry;

/// Read and decode every entry of a container snapshot
pub fn load_container(path: &Path) -> Result<Vec<ContainerEntry>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read container from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read container from {}", path.display()))?
    };

    let entries = parse_container(&content)?;
    debug!("Loaded {} container entries", entries.len());
    Ok(entries)
}

/// Decode a container snapshot held in memory
pub fn parse_container(content: &str) -> Result<Vec<ContainerEntry>> {
    let values: Vec<Value> =
        serde_json::from_str(content).context("Container snapshot is not a JSON array")?;

    values
        .into_iter()
        .enumerate()
        .map(|(position, value)| {
            ContainerEntry::from_json(position, value).map_err(anyhow::Error::from)
        })
        .collect()
}
