//! Sitemap entries and their metadata resolution.

use serde_json::Value;
use sitesmith_core::{
    Metadata,
    metadata::{as_number, lookup_present},
};
use tracing::debug;

use crate::{config::ResolvedConfig, lastmod::render_lastmod};

/// A sitemap URL entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitemapEntry {
    /// URL, relative to the hostname or absolute. May be empty.
    pub url: String,

    /// Change frequency.
    pub changefreq: Option<String>,

    /// Priority.
    pub priority: Option<f64>,

    /// Last modification date as an HTTP-date.
    pub lastmod: Option<String>,

    /// Alternate language versions.
    pub links: Vec<AlternateLink>,
}

/// Alternate language link for a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateLink {
    /// Language code (e.g., "en", "zh").
    pub hreflang: String,

    /// URL for this language version.
    pub href: String,
}

/// Assembles an entry one optional field at a time.
#[derive(Debug, Clone, Default)]
pub struct EntryBuilder {
    entry: SitemapEntry,
}

impl EntryBuilder {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            entry: SitemapEntry {
                url: url.into(),
                ..SitemapEntry::default()
            },
        }
    }

    #[must_use]
    pub fn changefreq(mut self, changefreq: Option<String>) -> Self {
        self.entry.changefreq = changefreq;
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Option<f64>) -> Self {
        self.entry.priority = priority;
        self
    }

    #[must_use]
    pub fn lastmod(mut self, lastmod: Option<String>) -> Self {
        self.entry.lastmod = lastmod;
        self
    }

    #[must_use]
    pub fn links(mut self, links: Vec<AlternateLink>) -> Self {
        self.entry.links = links;
        self
    }

    #[must_use]
    pub fn build(self) -> SitemapEntry {
        self.entry
    }
}

/// Fill `changefreq`, `priority`, `lastmod` and links from a metadata record,
/// falling back to the configured defaults.
pub fn resolve_fields(
    builder: EntryBuilder,
    metadata: &Metadata,
    config: &ResolvedConfig,
) -> EntryBuilder {
    let changefreq = lookup_present(metadata, "changefreq")
        .and_then(Value::as_str)
        .map_or_else(|| config.changefreq.clone(), str::to_string);

    let priority = lookup_present(metadata, "priority")
        .and_then(as_number)
        .unwrap_or(config.priority);

    let lastmod = match lookup_present(metadata, &config.modified_property) {
        Some(value) => Some(render_lastmod(value)),
        None => config
            .lastmod
            .as_deref()
            .map(|raw| render_lastmod(&Value::String(raw.to_string()))),
    };

    let links = config
        .links
        .as_deref()
        .and_then(|property| lookup_present(metadata, property))
        .map(alternate_links)
        .unwrap_or_default();

    builder
        .changefreq(Some(changefreq))
        .priority(Some(priority))
        .lastmod(lastmod)
        .links(links)
}

/// Read `[{lang, url}]` (or `hreflang`/`href`) records, skipping malformed ones.
fn alternate_links(value: &Value) -> Vec<AlternateLink> {
    let Some(items) = value.as_array() else {
        debug!("links property is not an array; ignoring");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let item = item.as_object()?;
            let hreflang = item
                .get("lang")
                .or_else(|| item.get("hreflang"))?
                .as_str()?;
            let href = item.get("url").or_else(|| item.get("href"))?.as_str()?;
            Some(AlternateLink {
                hreflang: hreflang.to_string(),
                href: href.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::SitemapOptions;

    fn record(value: Value) -> Metadata {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn resolve(metadata: Value, config: &ResolvedConfig) -> SitemapEntry {
        resolve_fields(EntryBuilder::new("page/"), &record(metadata), config).build()
    }

    #[test]
    fn test_builder_starts_empty() {
        let entry = EntryBuilder::new("a/").build();
        assert_eq!(entry.url, "a/");
        assert!(entry.changefreq.is_none());
        assert!(entry.priority.is_none());
        assert!(entry.lastmod.is_none());
        assert!(entry.links.is_empty());
    }

    #[test]
    fn test_defaults_from_config() {
        let config = ResolvedConfig::resolve("https://example.com").expect("resolve");
        let entry = resolve(json!({}), &config);

        assert_eq!(entry.changefreq.as_deref(), Some("weekly"));
        assert_eq!(entry.priority, Some(0.5));
        assert!(entry.lastmod.is_none());
    }

    #[test]
    fn test_metadata_overrides_config() {
        let config = ResolvedConfig::resolve("https://example.com").expect("resolve");
        let entry = resolve(
            json!({"changefreq": "daily", "priority": 0.9, "lastmod": "2024-01-14"}),
            &config,
        );

        assert_eq!(entry.changefreq.as_deref(), Some("daily"));
        assert_eq!(entry.priority, Some(0.9));
        assert_eq!(
            entry.lastmod.as_deref(),
            Some("Sun, 14 Jan 2024 00:00:00 GMT")
        );
    }

    #[test]
    fn test_zero_priority_in_metadata_is_kept() {
        let config = ResolvedConfig::resolve("https://example.com").expect("resolve");
        let entry = resolve(json!({"priority": 0}), &config);
        assert_eq!(entry.priority, Some(0.0));
    }

    #[test]
    fn test_unusable_metadata_values_fall_back() {
        let config = ResolvedConfig::resolve("https://example.com").expect("resolve");
        let entry = resolve(json!({"priority": "high", "changefreq": null}), &config);
        assert_eq!(entry.priority, Some(0.5));
        assert_eq!(entry.changefreq.as_deref(), Some("weekly"));
    }

    #[test]
    fn test_config_lastmod_default() {
        let options = SitemapOptions::new("https://example.com").with_lastmod("2024-01-14");
        let config = ResolvedConfig::resolve(options).expect("resolve");

        let entry = resolve(json!({}), &config);
        assert_eq!(
            entry.lastmod.as_deref(),
            Some("Sun, 14 Jan 2024 00:00:00 GMT")
        );

        let entry = resolve(json!({"lastmod": "2023-06-01"}), &config);
        assert_eq!(
            entry.lastmod.as_deref(),
            Some("Thu, 01 Jun 2023 00:00:00 GMT")
        );
    }

    #[test]
    fn test_invalid_lastmod_is_lenient() {
        let config = ResolvedConfig::resolve("https://example.com").expect("resolve");
        let entry = resolve(json!({"lastmod": "someday"}), &config);
        assert_eq!(entry.lastmod.as_deref(), Some("Invalid Date"));
    }

    #[test]
    fn test_custom_modified_property() {
        let options = SitemapOptions {
            modified_property: Some("updated".to_string()),
            ..SitemapOptions::new("https://example.com")
        };
        let config = ResolvedConfig::resolve(options).expect("resolve");

        let entry = resolve(json!({"updated": "2024-01-14", "lastmod": "1999-01-01"}), &config);
        assert_eq!(
            entry.lastmod.as_deref(),
            Some("Sun, 14 Jan 2024 00:00:00 GMT")
        );
    }

    #[test]
    fn test_alternate_links() {
        let options = SitemapOptions {
            links: Some("translations".to_string()),
            ..SitemapOptions::new("https://example.com")
        };
        let config = ResolvedConfig::resolve(options).expect("resolve");

        let entry = resolve(
            json!({"translations": [
                {"lang": "en", "url": "https://example.com/about/"},
                {"hreflang": "zh", "href": "https://example.com/zh/about/"},
                {"lang": "fr"},
                "bogus"
            ]}),
            &config,
        );

        assert_eq!(
            entry.links,
            vec![
                AlternateLink {
                    hreflang: "en".to_string(),
                    href: "https://example.com/about/".to_string(),
                },
                AlternateLink {
                    hreflang: "zh".to_string(),
                    href: "https://example.com/zh/about/".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_links_ignored_when_not_configured() {
        let config = ResolvedConfig::resolve("https://example.com").expect("resolve");
        let entry = resolve(
            json!({"links": [{"lang": "en", "url": "https://example.com/"}]}),
            &config,
        );
        assert!(entry.links.is_empty());
    }
}
