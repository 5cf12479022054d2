//! The sitemap pipeline plugin.

use sitesmith_core::{BuildFileSet, CoreError, Metadata, Plugin, SiteFile};
use tracing::{debug, info};

use crate::{
    config::{ResolvedConfig, SitemapConfig},
    entry::{EntryBuilder, SitemapEntry, resolve_fields},
    error::Result,
    filter::is_included,
    permalink::build_url,
    sitemap::SitemapWriter,
    static_entries::load_static_entries,
};

/// Generates a sitemap from the file set and adds it as a new file.
#[derive(Debug, Clone)]
pub struct Sitemap {
    config: ResolvedConfig,
}

impl Sitemap {
    /// Create the plugin, validating its configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the hostname is missing, the
    /// static entries file does not end in `.json`, or a pattern is invalid.
    pub fn new(config: impl Into<SitemapConfig>) -> Result<Self> {
        Ok(Self {
            config: ResolvedConfig::resolve(config)?,
        })
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Entry for one file, or `None` when the file is excluded.
    pub fn entry_for(&self, path: &str, metadata: &Metadata) -> Option<SitemapEntry> {
        if !is_included(path, metadata, &self.config) {
            debug!(path, "skipping file");
            return None;
        }

        let url = build_url(path, metadata, &self.config);
        Some(resolve_fields(EntryBuilder::new(url), metadata, &self.config).build())
    }

    /// All entries: file entries in file-set order, then static entries.
    pub fn collect_entries(&self, files: &BuildFileSet) -> Result<Vec<SitemapEntry>> {
        let mut entries: Vec<SitemapEntry> = files
            .iter()
            .filter_map(|(path, file)| self.entry_for(path, &file.metadata))
            .collect();

        if let Some(json_file) = &self.config.json_file {
            entries.extend(load_static_entries(json_file, &self.config)?);
        }

        Ok(entries)
    }

    /// Render the sitemap document for a file set.
    pub fn render(&self, files: &BuildFileSet) -> Result<String> {
        let entries = self.collect_entries(files)?;
        Ok(SitemapWriter::new(&self.config).render(&entries))
    }

    /// Render the sitemap and store it under the configured output path.
    ///
    /// Returns the number of entries written.
    pub fn generate(&self, files: &mut BuildFileSet) -> Result<usize> {
        let entries = self.collect_entries(files)?;
        let xml = SitemapWriter::new(&self.config).render(&entries);

        files.insert(self.config.output.clone(), SiteFile::new(xml));
        info!(path = %self.config.output, entries = entries.len(), "generated sitemap");

        Ok(entries.len())
    }
}

impl Plugin for Sitemap {
    fn name(&self) -> &str {
        "sitemap"
    }

    fn run(&self, files: &mut BuildFileSet) -> sitesmith_core::Result<()> {
        self.generate(files)
            .map(|_| ())
            .map_err(|e| CoreError::plugin(self.name(), e))
    }
}
