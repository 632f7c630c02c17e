#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point: filters Barcelona's cultural agenda and lists the
//! Bicing stations and parkings near each matching event.

use std::path::PathBuf;
use std::time::Instant;

use cerca_feeds::{LoadMode, all_feeds, load_all};
use cerca_proximity::{DEFAULT_MAX_KM, DEFAULT_TOP_K, ProximityPolicy};
use cerca_query::EventFilter;
use cerca_report::{build_report, html::render_html};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cerca",
    about = "Find cultural events and the bikes and parkings around them"
)]
struct Cli {
    /// Keyword query: a quoted string, a [list] (all must match) or a
    /// (tuple) (any may match), e.g. `["musica", ("jazz", "blues")]`
    #[arg(long = "key")]
    keys: Option<String>,
    /// Date query: "dd/mm/yyyy", a ("dd/mm/yyyy", low, high) day range, or
    /// lists/tuples of those
    #[arg(long)]
    date: Option<String>,
    /// Read feeds from the cache directory instead of downloading them
    #[arg(long)]
    offline: bool,
    /// Directory holding the cached feed files
    #[arg(long, default_value = ".")]
    cache_dir: PathBuf,
    /// Where to write the HTML report
    #[arg(long, default_value = "output.html")]
    output: PathBuf,
    /// Search radius around each event, in kilometers
    #[arg(long, default_value_t = DEFAULT_MAX_KM)]
    max_km: f64,
    /// Maximum number of stations or parkings listed per category
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let filter = EventFilter::parse(cli.keys.as_deref(), cli.date.as_deref())?;
    log::debug!("Keyword query: {:?}", filter.keywords);
    log::debug!("Date query: {:?}", filter.dates);

    let policy = ProximityPolicy {
        max_km: cli.max_km,
        top_k: cli.top_k,
    };
    let mode = if cli.offline {
        LoadMode::Cache
    } else {
        LoadMode::Network
    };

    let start = Instant::now();
    let feeds = load_all(&all_feeds(), mode, &cli.cache_dir).await;
    let rows = build_report(
        &feeds.events,
        &feeds.stations,
        &feeds.parkings,
        &filter,
        &policy,
    );

    tokio::fs::write(&cli.output, render_html(&rows)).await?;
    log::info!(
        "Wrote {} events to {} in {:.2}s",
        rows.len(),
        cli.output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
