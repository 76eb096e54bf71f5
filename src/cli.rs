//! Command-line interface parsing for yrcast
//!
//! This module handles parsing of CLI arguments using clap: the requested
//! time, the cache file location, and the feed source (remote URL or local
//! XML file).

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;
use thiserror::Error;

use crate::cache::FileStore;
use crate::data::fetcher::DEFAULT_FEED_URL;
use crate::data::TIME_FORMAT;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested time is not an ISO local date-time
    #[error("Invalid time: '{0}'. Expected an ISO local date-time such as 2018-02-11T23:00:00")]
    InvalidTime(String),

    /// No cache location was given and none could be derived
    #[error("Could not determine a cache directory; pass --cache-file explicitly")]
    NoCacheDir,
}

/// yrcast - Forecast temperature lookup with an on-disk cache
#[derive(Parser, Debug)]
#[command(name = "yrcast")]
#[command(about = "Look up the forecast temperature for a local date-time")]
#[command(version)]
pub struct Cli {
    /// Requested local date-time, e.g. 2018-02-11T23:00:00
    ///
    /// Seconds are optional on input; the cache always keys at second
    /// precision.
    pub time: String,

    /// Path to the temperature cache file
    #[arg(long, value_name = "FILE")]
    pub cache_file: Option<PathBuf>,

    /// Override the forecast feed URL
    #[arg(long, value_name = "URL", conflicts_with = "feed_file")]
    pub url: Option<String>,

    /// Read the forecast from a local XML file instead of the network
    #[arg(long, value_name = "FILE")]
    pub feed_file: Option<PathBuf>,
}

/// Where the resolver reads the forecast feed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Fetch over HTTP(S)
    Url(String),
    /// Read a local XML file
    File(PathBuf),
}

/// Configuration derived from CLI arguments for a resolver run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The instant to resolve a temperature for
    pub requested: NaiveDateTime,
    /// Backing file for the temperature store
    pub cache_file: PathBuf,
    /// Feed source to consult on a cache miss
    pub source: FeedSource,
}

/// Parses a requested-time argument, accepting second or minute precision.
pub fn parse_time_arg(s: &str) -> Result<NaiveDateTime, CliError> {
    NaiveDateTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| CliError::InvalidTime(s.to_string()))
}

impl RunConfig {
    /// Builds a RunConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let requested = parse_time_arg(&cli.time)?;

        let cache_file = match &cli.cache_file {
            Some(path) => path.clone(),
            None => FileStore::default_path().ok_or(CliError::NoCacheDir)?,
        };

        let source = match (&cli.feed_file, &cli.url) {
            (Some(path), _) => FeedSource::File(path.clone()),
            (None, Some(url)) => FeedSource::Url(url.clone()),
            (None, None) => FeedSource::Url(DEFAULT_FEED_URL.to_string()),
        };

        Ok(Self {
            requested,
            cache_file,
            source,
        })
    }
}
