//! Plugin seam and pipeline orchestration.
//!
//! A pipeline reads a source directory into a [`BuildFileSet`], hands the set
//! to each plugin in order, and writes whatever is left to the destination.

use std::{path::Path, time::Instant};

use tracing::{debug, info};

use crate::{error::Result, files::BuildFileSet};

/// A transformation step over the file set.
pub trait Plugin {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Transform the file set in place.
    ///
    /// Returning an error aborts the remaining plugins.
    fn run(&self, files: &mut BuildFileSet) -> Result<()>;
}

/// Pipeline statistics.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Number of files read from the source directory.
    pub files_read: usize,

    /// Number of files written to the destination directory.
    pub files_written: usize,

    /// Number of plugins run.
    pub plugins: usize,

    /// Duration in milliseconds.
    pub duration_ms: u64,
}

/// Ordered list of plugins.
#[derive(Default)]
pub struct Pipeline {
    plugins: Vec<Box<dyn Plugin>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Pipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin.
    #[must_use]
    pub fn with(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every plugin over an in-memory file set.
    pub fn process(&self, files: &mut BuildFileSet) -> Result<usize> {
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), files = files.len(), "running plugin");
            plugin.run(files)?;
        }
        Ok(self.plugins.len())
    }

    /// Read `source`, run the plugins, and write the result to `destination`.
    pub fn build(&self, source: &Path, destination: &Path) -> Result<PipelineStats> {
        let start = Instant::now();
        let mut stats = PipelineStats::default();

        info!(
            source = %source.display(),
            destination = %destination.display(),
            "starting build"
        );

        let mut files = BuildFileSet::read_dir(source)?;
        stats.files_read = files.len();

        stats.plugins = self.process(&mut files)?;
        stats.files_written = files.write_dir(destination)?;

        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(?stats, "build complete");

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{error::CoreError, files::SiteFile};

    struct Stamp(&'static str);

    impl Plugin for Stamp {
        fn name(&self) -> &str {
            "stamp"
        }

        fn run(&self, files: &mut BuildFileSet) -> Result<()> {
            files.insert(self.0, SiteFile::new(self.0));
            Ok(())
        }
    }

    struct Fail;

    impl Plugin for Fail {
        fn name(&self) -> &str {
            "fail"
        }

        fn run(&self, _files: &mut BuildFileSet) -> Result<()> {
            Err(CoreError::plugin(
                self.name(),
                std::io::Error::other("boom"),
            ))
        }
    }

    #[test]
    fn test_process_runs_plugins_in_order() {
        let pipeline = Pipeline::new().with(Stamp("a.txt")).with(Stamp("b.txt"));
        let mut files = BuildFileSet::new();

        let ran = pipeline.process(&mut files).expect("process");

        assert_eq!(ran, 2);
        assert!(files.contains("a.txt"));
        assert!(files.contains("b.txt"));
    }

    #[test]
    fn test_failing_plugin_stops_pipeline() {
        let pipeline = Pipeline::new().with(Fail).with(Stamp("never.txt"));
        let mut files = BuildFileSet::new();

        let err = pipeline.process(&mut files).unwrap_err();

        assert!(err.to_string().contains("fail"));
        assert!(!files.contains("never.txt"));
    }

    #[test]
    fn test_build_reads_and_writes() {
        let source = tempfile::tempdir().expect("create temp dir");
        let destination = tempfile::tempdir().expect("create temp dir");
        fs::write(source.path().join("index.html"), "<p>Home</p>").expect("write");

        let stats = Pipeline::new()
            .with(Stamp("extra.txt"))
            .build(source.path(), destination.path())
            .expect("build");

        assert_eq!(stats.files_read, 1);
        assert_eq!(stats.files_written, 2);
        assert_eq!(stats.plugins, 1);
        assert!(destination.path().join("index.html").exists());
        assert!(destination.path().join("extra.txt").exists());
    }

    #[test]
    fn test_pipeline_debug_lists_plugins() {
        let pipeline = Pipeline::new().with(Stamp("a.txt"));
        assert!(format!("{pipeline:?}").contains("stamp"));
    }
}
