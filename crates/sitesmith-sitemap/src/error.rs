//! Sitemap generation errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// Invalid plugin options, reported before any file is processed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Options file could not be parsed.
    #[error("Failed to parse options file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A file could not be read.
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The static entries file is not usable.
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl SitemapError {
    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new IO error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new parse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
