#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading of the public XML feeds.
//!
//! Each [`FeedDefinition`] names a feed URL and a cache file. Feeds are
//! either downloaded (and the cache refreshed) or read back from the cache,
//! then parsed into [`RawRecord`]s for the entity builders.

pub mod registry;
pub mod xml;

use std::path::Path;

use cerca_models::RawRecord;
use serde::Deserialize;
use strum_macros::{AsRefStr, Display, EnumString};

pub use registry::all_feeds;
pub use xml::parse_records;

/// Errors that can occur while loading a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error (cache read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// The three feeds the report combines.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedKind {
    /// Cultural agenda
    Events,
    /// Bicing bike-share stations
    Stations,
    /// Public parking lots
    Parkings,
}

impl FeedKind {
    /// XML element that delimits one record in this feed.
    #[must_use]
    pub const fn record_tag(self) -> &'static str {
        match self {
            Self::Events | Self::Parkings => "item",
            Self::Stations => "station",
        }
    }
}

/// Where a feed is published and where its local copy lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedDefinition {
    pub kind: FeedKind,
    /// Human-readable name.
    pub name: String,
    pub url: String,
    /// File name of the cached copy, relative to the cache directory.
    pub cache_file: String,
}

/// Whether feeds are downloaded or read from the local cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Download each feed and refresh its cache file.
    #[default]
    Network,
    /// Read each feed from its cache file.
    Cache,
}

/// Raw records of all three feeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRecords {
    pub events: Vec<RawRecord>,
    pub stations: Vec<RawRecord>,
    pub parkings: Vec<RawRecord>,
}

/// Downloads `url` and returns the response body.
///
/// # Errors
///
/// Returns [`FeedError::Http`] on connection failure or a non-success status.
pub async fn fetch(url: &str) -> Result<Vec<u8>, FeedError> {
    log::info!("Fetching {url}");
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Loads one feed and parses its records.
///
/// In [`LoadMode::Network`] a failure to write the cache file is logged and
/// otherwise ignored.
///
/// # Errors
///
/// Returns [`FeedError`] if the feed cannot be downloaded or read, or is
/// not well-formed XML.
pub async fn load_feed(
    feed: &FeedDefinition,
    mode: LoadMode,
    cache_dir: &Path,
) -> Result<Vec<RawRecord>, FeedError> {
    let cache_path = cache_dir.join(&feed.cache_file);

    let body = match mode {
        LoadMode::Network => {
            let body = fetch(&feed.url).await?;
            if let Err(e) = tokio::fs::write(&cache_path, &body).await {
                log::warn!("Could not cache {} at {}: {e}", feed.kind, cache_path.display());
            }
            body
        }
        LoadMode::Cache => {
            log::info!("Reading {} from {}", feed.kind, cache_path.display());
            tokio::fs::read(&cache_path).await?
        }
    };

    let records = parse_records(&body, feed.kind.record_tag())?;
    log::info!("Loaded {} {} records", records.len(), feed.kind);
    Ok(records)
}

/// Loads every feed in turn.
///
/// A feed that fails to load is logged and contributes no records, so the
/// report degrades to empty sections instead of failing.
pub async fn load_all(feeds: &[FeedDefinition], mode: LoadMode, cache_dir: &Path) -> FeedRecords {
    let mut out = FeedRecords::default();

    for feed in feeds {
        let records = match load_feed(feed, mode, cache_dir).await {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to load {} ({}): {e}", feed.kind, feed.name);
                Vec::new()
            }
        };
        match feed.kind {
            FeedKind::Events => out.events.extend(records),
            FeedKind::Stations => out.stations.extend(records),
            FeedKind::Parkings => out.parkings.extend(records),
        }
    }

    out
}
