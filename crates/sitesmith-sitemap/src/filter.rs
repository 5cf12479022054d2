//! Inclusion filter for candidate files.

use glob::{MatchOptions, Pattern};
use sitesmith_core::{
    Metadata,
    metadata::{is_truthy, lookup},
};

use crate::{
    config::ResolvedConfig,
    error::{Result, SitemapError},
    permalink::normalize_separators,
};

/// `*` stays within one path segment and never matches a leading dot.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Clone)]
struct Rule {
    negated: bool,
    pattern: Pattern,
}

/// Ordered glob patterns with `!` negation.
///
/// Rules apply in order: a positive rule includes paths it matches and a
/// negated rule excludes them again. A path nothing includes is excluded.
#[derive(Debug, Clone)]
pub struct PatternSet {
    rules: Vec<Rule>,
}

impl PatternSet {
    /// Compile patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                let (negated, glob) = match raw.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, raw),
                };
                let pattern = Pattern::new(glob).map_err(|e| {
                    SitemapError::config(format!("invalid pattern `{raw}`: {e}"))
                })?;
                Ok(Rule { negated, pattern })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Whether `path` (with `/` separators) is selected.
    pub fn matches(&self, path: &str) -> bool {
        self.rules.iter().fold(false, |selected, rule| {
            if rule.pattern.matches_with(path, MATCH_OPTIONS) {
                !rule.negated
            } else {
                selected
            }
        })
    }
}

/// Whether a file belongs in the sitemap.
///
/// A file is included when its path matches the pattern set and its
/// private property is not truthy.
pub fn is_included(path: &str, metadata: &Metadata, config: &ResolvedConfig) -> bool {
    if !config.pattern.matches(&normalize_separators(path)) {
        return false;
    }

    !lookup(metadata, &config.private_property).is_some_and(is_truthy)
}
