//! In-memory file set passed between pipeline plugins.

use std::{
    collections::{BTreeMap, btree_map},
    fs,
    path::Path,
};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    error::{CoreError, Result},
    frontmatter::parse_frontmatter,
    metadata::Metadata,
};

/// A single output file: raw contents plus the metadata attached upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteFile {
    /// Raw file contents.
    pub contents: Vec<u8>,

    /// Frontmatter-like metadata record.
    pub metadata: Metadata,
}

impl SiteFile {
    /// Create a file with contents and no metadata.
    #[must_use]
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: contents.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata record.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Mapping from output-relative path to file.
///
/// Keys are kept exactly as supplied, so they may use either `/` or the
/// platform separator. Iteration is in key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildFileSet {
    files: BTreeMap<String, SiteFile>,
}

impl BuildFileSet {
    /// Create an empty file set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file, returning the one previously stored under `path`.
    pub fn insert(&mut self, path: impl Into<String>, file: SiteFile) -> Option<SiteFile> {
        self.files.insert(path.into(), file)
    }

    /// Get a file by path.
    pub fn get(&self, path: &str) -> Option<&SiteFile> {
        self.files.get(path)
    }

    /// Remove a file by path.
    pub fn remove(&mut self, path: &str) -> Option<SiteFile> {
        self.files.remove(path)
    }

    /// Whether a file exists under `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate files in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, SiteFile> {
        self.files.iter()
    }

    /// Iterate paths in key order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Load every file below `dir`.
    ///
    /// Keys are relative to `dir` and use the platform separator. UTF-8 files
    /// opening with a frontmatter block have it moved into metadata.
    pub fn read_dir(dir: &Path) -> Result<Self> {
        let mut set = Self::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Ok(relative) = path.strip_prefix(dir) else {
                continue;
            };
            let key = relative.to_string_lossy().into_owned();
            let bytes = fs::read(path).map_err(|e| CoreError::io(path, e))?;

            let file = match std::str::from_utf8(&bytes) {
                Ok(text) => {
                    let (metadata, body) = parse_frontmatter(text, path)?;
                    SiteFile::new(body).with_metadata(metadata)
                }
                Err(_) => SiteFile::new(bytes),
            };

            debug!(path = %key, keys = file.metadata.len(), "loaded file");
            set.insert(key, file);
        }

        info!(dir = %dir.display(), count = set.len(), "read source files");
        Ok(set)
    }

    /// Write every file below `dir`, creating parent directories.
    ///
    /// Returns the number of files written.
    pub fn write_dir(&self, dir: &Path) -> Result<usize> {
        for (key, file) in &self.files {
            let target = dir.join(key);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| CoreError::io(parent, e))?;
            }
            fs::write(&target, &file.contents).map_err(|e| CoreError::io(&target, e))?;
            debug!(path = %target.display(), bytes = file.contents.len(), "wrote file");
        }

        info!(dir = %dir.display(), count = self.files.len(), "wrote output files");
        Ok(self.files.len())
    }
}

impl<'a> IntoIterator for &'a BuildFileSet {
    type Item = (&'a String, &'a SiteFile);
    type IntoIter = btree_map::Iter<'a, String, SiteFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, SiteFile)> for BuildFileSet {
    fn from_iter<I: IntoIterator<Item = (K, SiteFile)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(|(k, f)| (k.into(), f)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_insert_and_iterate_in_key_order() {
        let mut set = BuildFileSet::new();
        set.insert("z.html", SiteFile::new("z"));
        set.insert("a.html", SiteFile::new("a"));
        set.insert("m/index.html", SiteFile::new("m"));

        let paths: Vec<&str> = set.paths().collect();
        assert_eq!(paths, vec!["a.html", "m/index.html", "z.html"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("a.html"));
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut set = BuildFileSet::new();
        assert!(set.insert("a.html", SiteFile::new("one")).is_none());
        let previous = set.insert("a.html", SiteFile::new("two")).expect("previous");
        assert_eq!(previous.contents, b"one");
        assert_eq!(set.get("a.html").map(|f| f.contents.as_slice()), Some(&b"two"[..]));
    }

    #[test]
    fn test_remove() {
        let mut set: BuildFileSet = [("a.html", SiteFile::new("a")), ("b.html", SiteFile::new("b"))]
            .into_iter()
            .collect();

        let removed = set.remove("a.html").expect("removed");
        assert_eq!(removed.contents, b"a");
        assert!(!set.contains("a.html"));
        assert!(set.remove("a.html").is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_read_dir_parses_frontmatter() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("blog")).expect("mkdir");
        fs::write(
            dir.path().join("blog").join("post.html"),
            "---\npriority: 0.8\n---\n<p>Post</p>",
        )
        .expect("write");
        fs::write(dir.path().join("index.html"), "<p>Home</p>").expect("write");
        fs::write(dir.path().join("logo.bin"), [0xff_u8, 0xfe, 0x00]).expect("write");

        let set = BuildFileSet::read_dir(dir.path()).expect("read dir");

        assert_eq!(set.len(), 3);
        let key = Path::new("blog").join("post.html").to_string_lossy().into_owned();
        let post = set.get(&key).expect("post");
        assert_eq!(post.metadata.get("priority"), Some(&json!(0.8)));
        assert_eq!(post.contents, b"<p>Post</p>");

        let home = set.get("index.html").expect("home");
        assert!(home.metadata.is_empty());

        let logo = set.get("logo.bin").expect("binary");
        assert_eq!(logo.contents, vec![0xff, 0xfe, 0x00]);
    }

    #[test]
    fn test_write_dir_creates_parents() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let set: BuildFileSet = [
            ("docs/guide/index.html", SiteFile::new("guide")),
            ("sitemap.xml", SiteFile::new("<urlset/>")),
        ]
        .into_iter()
        .collect();

        let written = set.write_dir(dir.path()).expect("write dir");

        assert_eq!(written, 2);
        let guide = fs::read_to_string(dir.path().join("docs/guide/index.html")).expect("read");
        assert_eq!(guide, "guide");
        assert!(dir.path().join("sitemap.xml").exists());
    }

    #[test]
    fn test_read_dir_missing_directory() {
        let result = BuildFileSet::read_dir(Path::new("/nonexistent/sitesmith/src"));
        assert!(result.is_err());
    }
}
