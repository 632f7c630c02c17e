//! Compile-time registry of the public feeds.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.

use crate::FeedDefinition;

/// Embedded TOML feed definitions.
const FEED_TOMLS: &[(&str, &str)] = &[
    ("events", include_str!("../feeds/events.toml")),
    ("stations", include_str!("../feeds/stations.toml")),
    ("parkings", include_str!("../feeds/parkings.toml")),
];

/// Returns all registered feeds.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error.
#[must_use]
pub fn all_feeds() -> Vec<FeedDefinition> {
    FEED_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse feed definition '{name}': {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::FeedKind;

    #[test]
    fn registers_one_feed_per_kind() {
        let feeds = all_feeds();
        let kinds: BTreeSet<FeedKind> = feeds.iter().map(|f| f.kind).collect();
        assert_eq!(feeds.len(), 3);
        assert_eq!(kinds.len(), 3);
    }

    #[test]
    fn registry_names_match_kinds() {
        for ((name, _), feed) in FEED_TOMLS.iter().zip(all_feeds()) {
            assert_eq!(*name, feed.kind.as_ref());
        }
    }

    #[test]
    fn all_feeds_have_required_fields() {
        for feed in &all_feeds() {
            assert!(!feed.name.is_empty(), "Feed {} has empty name", feed.kind);
            assert!(
                feed.url.starts_with("http"),
                "Feed {} has invalid url: {}",
                feed.kind,
                feed.url
            );
            assert!(
                feed.cache_file.ends_with(".xml"),
                "Feed {} has unexpected cache file: {}",
                feed.kind,
                feed.cache_file
            );
        }
    }
}
