//! Sitemap options and their resolution.
//!
//! Callers hand the plugin either a bare hostname or a full options table.
//! Both forms resolve once, at construction, into a [`ResolvedConfig`] where
//! every default has been applied.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use url::Url;

use crate::{
    error::{Result, SitemapError},
    filter::PatternSet,
};

/// Raw plugin configuration: a hostname or an options table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SitemapConfig {
    /// Shorthand for `{ hostname }`.
    Hostname(String),
    /// Full options.
    Options(SitemapOptions),
}

impl From<&str> for SitemapConfig {
    fn from(hostname: &str) -> Self {
        Self::Hostname(hostname.to_string())
    }
}

impl From<String> for SitemapConfig {
    fn from(hostname: String) -> Self {
        Self::Hostname(hostname)
    }
}

impl From<SitemapOptions> for SitemapConfig {
    fn from(options: SitemapOptions) -> Self {
        Self::Options(options)
    }
}

/// One glob or an ordered list of globs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl Patterns {
    fn as_slice(&self) -> &[String] {
        match self {
            Self::One(pattern) => std::slice::from_ref(pattern),
            Self::Many(patterns) => patterns,
        }
    }
}

impl From<&str> for Patterns {
    fn from(pattern: &str) -> Self {
        Self::One(pattern.to_string())
    }
}

impl From<Vec<&str>> for Patterns {
    fn from(patterns: Vec<&str>) -> Self {
        Self::Many(patterns.into_iter().map(str::to_string).collect())
    }
}

/// Caller-facing sitemap options. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SitemapOptions {
    /// Site root used to resolve every `<loc>` (required).
    pub hostname: Option<String>,

    /// Default change frequency.
    pub changefreq: Option<String>,

    /// Default last-modified date, applied to entries without their own.
    pub lastmod: Option<String>,

    /// Drop file extensions from derived URLs.
    pub omit_extension: bool,

    /// Drop a trailing `index.html` from derived URLs.
    pub omit_index: bool,

    /// Path of the generated artifact in the file set.
    pub output: Option<String>,

    /// Files to include; `!`-prefixed globs exclude.
    pub pattern: Option<Patterns>,

    /// Default priority. Values that are not numbers fall back to `0.5`.
    #[serde(deserialize_with = "lenient_number")]
    pub priority: Option<f64>,

    /// JSON file of extra entries appended after the file-derived ones.
    pub json_file: Option<PathBuf>,

    /// Metadata property that hides a file from the sitemap.
    pub private_property: Option<String>,

    /// Metadata property holding a canonical URL override.
    pub url_property: Option<String>,

    /// Metadata property holding the last-modified date.
    pub modified_property: Option<String>,

    /// Metadata property holding alternate-language links.
    pub links: Option<String>,
}

impl SitemapOptions {
    /// Create options for a hostname.
    #[must_use]
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            ..Self::default()
        }
    }

    /// Load options from a TOML file using the camelCase option names.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SitemapError::config(format!(
                "Options file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| SitemapError::io(path, e))?;
        toml::from_str(&content).map_err(|source| SitemapError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the file patterns.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<Patterns>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the static entries file.
    #[must_use]
    pub fn with_json_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_file = Some(path.into());
        self
    }

    /// Enable or disable `index.html` stripping.
    #[must_use]
    pub fn with_omit_index(mut self, omit: bool) -> Self {
        self.omit_index = omit;
        self
    }

    /// Enable or disable extension stripping.
    #[must_use]
    pub fn with_omit_extension(mut self, omit: bool) -> Self {
        self.omit_extension = omit;
        self
    }

    /// Set the default priority.
    #[must_use]
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the default last-modified date.
    #[must_use]
    pub fn with_lastmod(mut self, lastmod: impl Into<String>) -> Self {
        self.lastmod = Some(lastmod.into());
        self
    }
}

/// Accept numbers and numeric strings; anything else reads as unset.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(sitesmith_core::metadata::as_number))
}

/// Options with every default applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Hostname exactly as supplied.
    pub hostname: String,

    pub changefreq: String,
    pub lastmod: Option<String>,
    pub omit_extension: bool,
    pub omit_index: bool,
    pub output: String,
    pub pattern: PatternSet,
    pub priority: f64,
    pub json_file: Option<PathBuf>,
    pub private_property: String,
    pub url_property: String,
    pub modified_property: String,
    pub links: Option<String>,
}

// Default value functions
fn default_changefreq() -> String {
    "weekly".to_string()
}

fn default_output() -> String {
    "sitemap.xml".to_string()
}

fn default_pattern() -> Patterns {
    Patterns::One("**/*.html".to_string())
}

fn default_priority() -> f64 {
    0.5
}

fn default_private_property() -> String {
    "private".to_string()
}

fn default_url_property() -> String {
    "canonical".to_string()
}

fn default_modified_property() -> String {
    "lastmod".to_string()
}

impl ResolvedConfig {
    /// Validate raw configuration and apply defaults.
    pub fn resolve(config: impl Into<SitemapConfig>) -> Result<Self> {
        let options = match config.into() {
            SitemapConfig::Hostname(hostname) => SitemapOptions::new(hostname),
            SitemapConfig::Options(options) => options,
        };

        let hostname = options
            .hostname
            .filter(|h| !h.is_empty())
            .ok_or_else(|| SitemapError::config("hostname is required"))?;

        if let Some(json_file) = &options.json_file {
            if json_file.extension().and_then(|ext| ext.to_str()) != Some("json") {
                return Err(SitemapError::config(format!(
                    "jsonFile must have a .json extension: {}",
                    json_file.display()
                )));
            }
        }

        if Url::parse(&hostname).is_err() {
            warn!(%hostname, "hostname is not an absolute URL");
        }

        let pattern = options.pattern.unwrap_or_else(default_pattern);
        let pattern = PatternSet::new(pattern.as_slice())?;

        Ok(Self {
            hostname,
            changefreq: options.changefreq.unwrap_or_else(default_changefreq),
            lastmod: options.lastmod,
            omit_extension: options.omit_extension,
            omit_index: options.omit_index,
            output: options.output.unwrap_or_else(default_output),
            pattern,
            priority: options
                .priority
                .filter(|p| p.is_finite())
                .unwrap_or_else(default_priority),
            json_file: options.json_file,
            private_property: options
                .private_property
                .unwrap_or_else(default_private_property),
            url_property: options.url_property.unwrap_or_else(default_url_property),
            modified_property: options
                .modified_property
                .unwrap_or_else(default_modified_property),
            links: options.links,
        })
    }
}
