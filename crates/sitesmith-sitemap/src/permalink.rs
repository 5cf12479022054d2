//! URL derivation for file entries.

use serde_json::Value;
use sitesmith_core::{Metadata, metadata::lookup};

use crate::config::ResolvedConfig;

const INDEX_FILE: &str = "index.html";

/// Replace backslash separators with `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Build the URL of a file entry.
///
/// The first applicable rule wins:
/// 1. a string canonical property, verbatim;
/// 2. with `omit_index`, a path whose last segment is `index.html` loses
///    that suffix;
/// 3. with `omit_extension`, the path loses its extension;
/// 4. the normalized path.
///
/// The result always ends in `/`.
pub fn build_url(path: &str, metadata: &Metadata, config: &ResolvedConfig) -> String {
    let mut url = match lookup(metadata, &config.url_property) {
        Some(Value::String(canonical)) => canonical.clone(),
        _ => derive_from_path(path, config.omit_index, config.omit_extension),
    };

    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

fn derive_from_path(path: &str, omit_index: bool, omit_extension: bool) -> String {
    let mut normalized = normalize_separators(path);

    if omit_index && file_name(&normalized) == INDEX_FILE {
        normalized.truncate(normalized.len() - INDEX_FILE.len());
        return normalized;
    }

    if omit_extension {
        if let Some(extension) = extension_len(&normalized) {
            normalized.truncate(normalized.len() - extension);
        }
    }

    normalized
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Byte length of the extension including its dot. A leading dot alone
/// (`.htaccess`) is not an extension.
fn extension_len(path: &str) -> Option<usize> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(name.len() - dot),
    }
}
