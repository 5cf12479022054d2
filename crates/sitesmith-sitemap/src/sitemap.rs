//! Sitemap serialization.
//!
//! Renders entries as a single sitemap protocol `<urlset>` document.

use tracing::debug;
use url::Url;

use crate::{config::ResolvedConfig, entry::SitemapEntry};

/// Sitemap protocol namespace.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// XHTML namespace used by alternate-language links.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Sitemap XML writer.
#[derive(Debug)]
pub struct SitemapWriter<'a> {
    hostname: &'a str,
}

impl<'a> SitemapWriter<'a> {
    /// Create a writer prefixing locations with the configured hostname.
    #[must_use]
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self {
            hostname: &config.hostname,
        }
    }

    /// Render entries in order.
    pub fn render(&self, entries: &[SitemapEntry]) -> String {
        debug!(count = entries.len(), "rendering sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}""#));

        if entries.iter().any(|entry| !entry.links.is_empty()) {
            xml.push_str(&format!(r#" xmlns:xhtml="{XHTML_NS}""#));
        }
        xml.push_str(">\n");

        for entry in entries {
            xml.push_str(&self.url_to_xml(entry));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Absolute location for an entry URL.
    ///
    /// URLs with a scheme, and URLs already starting with the hostname, are
    /// written as given. Anything else is `hostname + "/" + url` with a single
    /// slash between them. An empty URL stays empty.
    pub fn location(&self, url: &str) -> String {
        if url.is_empty() || url.starts_with(self.hostname) || Url::parse(url).is_ok() {
            return url.to_string();
        }

        self.concatenate(url)
    }

    fn concatenate(&self, url: &str) -> String {
        format!(
            "{}/{}",
            self.hostname.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }

    fn url_to_xml(&self, entry: &SitemapEntry) -> String {
        let mut xml = String::from("  <url>\n");

        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&self.location(&entry.url))
        ));

        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
        }

        if let Some(changefreq) = &entry.changefreq {
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                escape_xml(changefreq)
            ));
        }

        if let Some(priority) = entry.priority {
            xml.push_str(&format!("    <priority>{priority}</priority>\n"));
        }

        for link in &entry.links {
            xml.push_str(&format!(
                r#"    <xhtml:link rel="alternate" hreflang="{}" href="{}" />"#,
                escape_xml(&link.hreflang),
                escape_xml(&self.location(&link.href))
            ));
            xml.push('\n');
        }

        xml.push_str("  </url>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
