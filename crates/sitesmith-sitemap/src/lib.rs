//! Sitesmith Sitemap
//!
//! XML sitemap generation for a sitesmith build. The [`Sitemap`] plugin
//! selects files from the build's file set, derives a URL and metadata for
//! each, appends optional static entries from a JSON file, and stores the
//! rendered document as one more output file.
//!
//! # Modules
//!
//! - [`config`] - Options and their resolution into defaults
//! - [`filter`] - Glob and private-flag inclusion rules
//! - [`permalink`] - URL derivation from file paths
//! - [`entry`] - Entries and metadata resolution
//! - [`lastmod`] - Date parsing and HTTP-date rendering
//! - [`static_entries`] - Entries loaded from a JSON side file
//! - [`sitemap`] - XML serialization
//! - [`plugin`] - The pipeline plugin
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use sitesmith_core::Pipeline;
//! use sitesmith_sitemap::{Sitemap, SitemapOptions};
//!
//! let options = SitemapOptions::new("https://example.com").with_omit_index(true);
//! let stats = Pipeline::new()
//!     .with(Sitemap::new(options)?)
//!     .build(Path::new("src"), Path::new("public"))?;
//! println!("wrote {} files", stats.files_written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod filter;
pub mod lastmod;
pub mod permalink;
pub mod plugin;
pub mod sitemap;
pub mod static_entries;

pub use config::{Patterns, ResolvedConfig, SitemapConfig, SitemapOptions};
pub use entry::{AlternateLink, EntryBuilder, SitemapEntry};
pub use error::{Result, SitemapError};
pub use filter::PatternSet;
pub use plugin::Sitemap;
pub use sitemap::SitemapWriter;
