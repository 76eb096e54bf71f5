//! yrcast - Forecast temperature lookup with an on-disk cache
//!
//! Resolves the forecast temperature for a requested local date-time from an
//! yr.no-style XML feed. Resolved values are cached in a plain-text store so
//! repeated requests for the same instant never re-fetch the feed.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use yrcast::cache::FileStore;
use yrcast::cli::{Cli, FeedSource, RunConfig};
use yrcast::data::{FileFetcher, HttpFetcher};
use yrcast::resolver::{ForecastResolver, ResolveError};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    info!(requested = %config.requested, "Resolving forecast temperature");

    let store = FileStore::with_path(config.cache_file.clone());
    let outcome = match &config.source {
        FeedSource::Url(url) => {
            ForecastResolver::new(HttpFetcher::new(url.clone()), store)
                .temperature_at(config.requested)
                .await
        }
        FeedSource::File(path) => {
            ForecastResolver::new(FileFetcher::new(path.clone()), store)
                .temperature_at(config.requested)
                .await
        }
    };

    match outcome {
        Ok(temperature) => {
            println!("{temperature}");
            ExitCode::SUCCESS
        }
        Err(ResolveError::TemperatureNotFound(time)) => {
            eprintln!("No forecast window covers {time}");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
