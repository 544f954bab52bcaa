//! svt-scrape - soundtrack scraper entry point
//!
//! Collects the soundtrack of every video in a filmmaker's catalog, looks each
//! song up on Last.fm and writes the combined table to
//! `data/{date}_strobeck_track_data.csv` under the run root.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use svt_common::config::{load_json_config, JsonConfig, RunLayout};
use svt_common::logging::{init_logging, LoggingConfig};
use svt_common::time::today;
use svt_scrape::config::{resolve_settings, SettingsOverrides};
use svt_scrape::services::{build_http_client, HttpFetcher, LastFmClient};
use svt_scrape::workflow::ScrapePipeline;
use tracing::{info, warn};

/// Command-line arguments for svt-scrape
#[derive(Parser, Debug)]
#[command(name = "svt-scrape")]
#[command(about = "Scrape video soundtracks and enrich them with Last.fm metadata")]
#[command(version)]
struct Args {
    /// Run root holding config.json, logs/ and data/
    #[arg(long, default_value = ".", env = "SVT_ROOT")]
    root: PathBuf,

    /// Config file (default: <root>/config.json)
    #[arg(long, env = "SVT_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog site root
    #[arg(long, env = "SVT_BASE_URL")]
    base_url: Option<String>,

    /// Filmmaker page path on the catalog site
    #[arg(long, env = "SVT_FILMMAKER_PATH")]
    filmmaker_path: Option<String>,

    /// Last.fm API endpoint
    #[arg(long, env = "SVT_LASTFM_API_URL")]
    lastfm_api_url: Option<String>,

    /// Last.fm API key (also read from SVT_LAST_FM_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Output table (default: <root>/data/<date>_strobeck_track_data.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the table once at the end instead of after every video
    #[arg(long)]
    persist_at_end: bool,

    /// HTTP request timeout in seconds (default: none)
    #[arg(long, env = "SVT_HTTP_TIMEOUT_SECS")]
    http_timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let date = today();

    let layout = RunLayout::new(&args.root);
    if let Err(e) = layout.ensure_directories() {
        eprintln!("Error: could not create run directories: {}", e);
    }

    // Read before logging starts so log_level can apply; problems are
    // reported on the console now and logged once the subscriber is up
    let config_path = args.config.clone().unwrap_or_else(|| layout.config_path());
    let (config, config_error) = match load_json_config(&config_path) {
        Ok(config) => (config, None),
        Err(e) => {
            eprintln!("Error: could not load {}: {}", config_path.display(), e);
            (JsonConfig::default(), Some(e))
        }
    };

    let logging = LoggingConfig {
        level: config.log_level.clone().unwrap_or_else(|| "info".to_string()),
        file: Some(layout.log_path(date)),
    };
    let log_file = init_logging(&logging).context("Failed to initialize logging")?;

    info!("Starting svt-scrape");
    info!(
        "Version: {} ({}; built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP")
    );
    if let Some(path) = &log_file {
        info!("Log file: {}", path.display());
    }
    if let Some(e) = config_error {
        warn!(path = %config_path.display(), error = %e, "Config file unavailable, using defaults");
    }

    let overrides = SettingsOverrides {
        base_url: args.base_url,
        filmmaker_path: args.filmmaker_path,
        lastfm_api_url: args.lastfm_api_url,
        api_key: args.api_key,
        output: args.output,
        http_timeout_secs: args.http_timeout_secs,
        persist_at_end: args.persist_at_end,
    };
    let settings = resolve_settings(overrides, &config, &layout, date);
    info!("Catalog: {}", settings.index_url());
    info!("Output: {}", settings.output_path.display());

    let http_client =
        build_http_client(settings.http_timeout).context("Failed to create HTTP client")?;
    let fetcher = Arc::new(HttpFetcher::new(http_client.clone()));
    let lookup = Arc::new(LastFmClient::new(
        http_client,
        settings.lastfm_api_url.clone(),
        settings.api_key.clone(),
    ));

    let pipeline = ScrapePipeline::new(settings.pipeline_settings(), fetcher, lookup)
        .context("Failed to initialize scrape pipeline")?;

    let summary = pipeline.run().await;
    println!("{}", summary.display_string());

    Ok(())
}
