//! Extra entries loaded from a JSON side file.
//!
//! The file holds an array of records such as
//! `{"path": "external/page", "priority": 0.3}`. An object whose values are
//! records is accepted too. Record URLs are `hostname + "/" + path` with no
//! trailing-slash normalization, unlike file entries.

use std::path::Path;

use serde_json::Value;
use sitesmith_core::Metadata;
use tracing::{debug, info};

use crate::{
    config::ResolvedConfig,
    entry::{EntryBuilder, SitemapEntry, resolve_fields},
    error::{Result, SitemapError},
};

/// Read and convert every record in `path`.
///
/// The whole file is read eagerly; a missing file or invalid JSON aborts.
pub fn load_static_entries(path: &Path, config: &ResolvedConfig) -> Result<Vec<SitemapEntry>> {
    let raw = std::fs::read_to_string(path).map_err(|e| SitemapError::io(path, e))?;
    let value: Value =
        serde_json::from_str(&raw).map_err(|e| SitemapError::parse(path, e.to_string()))?;

    let records = match value {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, record)| record).collect(),
        other => {
            return Err(SitemapError::parse(
                path,
                format!("expected an array of entries, found {}", json_type(&other)),
            ));
        }
    };

    let entries: Vec<SitemapEntry> = records
        .iter()
        .map(|record| static_entry(record, config))
        .collect();

    info!(path = %path.display(), count = entries.len(), "loaded static sitemap entries");
    Ok(entries)
}

/// Convert one record. Records that are not objects yield an entry with an
/// empty URL and default metadata.
pub fn static_entry(record: &Value, config: &ResolvedConfig) -> SitemapEntry {
    let empty = Metadata::new();
    let metadata = record.as_object().unwrap_or(&empty);

    let url = match metadata.get("path") {
        Some(Value::String(path)) => format!("{}/{}", config.hostname, path),
        Some(Value::Number(path)) => format!("{}/{}", config.hostname, path),
        _ => String::new(),
    };
    debug!(%url, "static entry");

    resolve_fields(EntryBuilder::new(url), metadata, config).build()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
