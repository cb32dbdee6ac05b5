use anyhow::Context;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::EndpointData;

const DATA_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Load scanner output from disk.
///
/// * A directory: each `*.yaml`, `*.yml` or `*.json` file directly inside it
///   becomes one entry keyed by its file stem. Other files are ignored.
/// * A single file: its top-level mapping is the file-key → record mapping.
///   A top-level value that is not a mapping yields empty data.
///
/// # Errors
///
/// Returns an error if the path cannot be read or a data file fails to parse.
pub fn load_endpoint_data(path: &Path) -> anyhow::Result<EndpointData> {
    if path.is_dir() {
        load_data_dir(path)
    } else {
        let value = read_data_file(path)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => {
                debug!(path = %path.display(), "Top-level input is not a mapping; nothing to load");
                Ok(Map::new())
            }
        }
    }
}

fn load_data_dir(dir: &Path) -> anyhow::Result<EndpointData> {
    let mut data = Map::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read endpoint data dir: {}", dir.display()))?;

    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list endpoint data dir: {}", dir.display()))?
            .path();
        if !path.is_file() || !has_data_extension(&path) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            debug!(path = %path.display(), "Skipping data file with non UTF-8 name");
            continue;
        };
        let value = read_data_file(&path)?;
        data.insert(stem.to_string(), value);
    }

    info!(dir = %dir.display(), files = data.len(), "Loaded endpoint data");
    Ok(data)
}

fn has_data_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| DATA_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Parse one YAML or JSON file into a JSON value, keeping key order.
pub(crate) fn read_data_file(path: &Path) -> anyhow::Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read endpoint data: {}", path.display()))?;
    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let value = if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse endpoint data: {}", path.display()))?
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse endpoint data: {}", path.display()))?
    };
    Ok(value)
}
