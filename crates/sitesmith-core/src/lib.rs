//! Sitesmith Core Library
//!
//! The build-pipeline side of sitesmith: the in-memory file set, per-file
//! metadata records, frontmatter loading and the plugin seam.

pub mod error;
pub mod files;
pub mod frontmatter;
pub mod metadata;
pub mod plugin;

pub use error::{CoreError, Result};
pub use files::{BuildFileSet, SiteFile};
pub use metadata::Metadata;
pub use plugin::{Pipeline, PipelineStats, Plugin};
