//! Frontmatter extraction for source files entering the pipeline.
//!
//! A file may open with a YAML block fenced by `---` or a TOML block fenced
//! by `+++`. The block becomes the file's [`Metadata`]; the rest stays as the
//! file contents.

use std::path::Path;

use serde_json::Value;

use crate::{
    error::{CoreError, Result},
    metadata::Metadata,
};

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn detect(content: &str) -> Option<Self> {
        if content.starts_with(Self::Yaml.delimiter()) {
            Some(Self::Yaml)
        } else if content.starts_with(Self::Toml.delimiter()) {
            Some(Self::Toml)
        } else {
            None
        }
    }
}

/// Split content into frontmatter and body.
///
/// Both fences must sit on their own line. Returns `None` when the content
/// carries no complete frontmatter block.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let format = FrontmatterFormat::detect(content)?;
    let delimiter = format.delimiter();

    let rest = content[delimiter.len()..]
        .strip_prefix("\r\n")
        .or_else(|| content[delimiter.len()..].strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((format, block, body));
        }
        offset += line.len();
    }

    None
}

/// Parse frontmatter from file contents.
///
/// Content without frontmatter yields an empty record and the unchanged
/// content.
pub fn parse_frontmatter<'a>(content: &'a str, path: &Path) -> Result<(Metadata, &'a str)> {
    let Some((format, block, body)) = split_frontmatter(content) else {
        return Ok((Metadata::new(), content));
    };

    let value = match format {
        FrontmatterFormat::Yaml => {
            if block.trim().is_empty() {
                Value::Object(Metadata::new())
            } else {
                serde_yaml::from_str::<Value>(block)
                    .map_err(|e| CoreError::frontmatter(path, e.to_string()))?
            }
        }
        FrontmatterFormat::Toml => {
            let table = toml::from_str::<toml::Table>(block)
                .map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            toml_to_json(toml::Value::Table(table))
        }
    };

    match value {
        Value::Object(metadata) => Ok((metadata, body)),
        Value::Null => Ok((Metadata::new(), body)),
        _ => Err(CoreError::frontmatter(path, "frontmatter must be a mapping")),
    }
}

/// TOML datetimes have no JSON counterpart; they are kept as their textual form.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(n) => Value::from(n),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(flag) => Value::Bool(flag),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
