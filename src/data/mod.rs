//! Core data model for yrcast
//!
//! This module contains the forecast data types shared across the crate,
//! together with the feed parser and the fetcher implementations.

pub mod feed;
pub mod fetcher;

pub use feed::{parse_forecast, ParseError};
pub use fetcher::{FetchError, FileFetcher, ForecastFetcher, HttpFetcher};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format shared by cache keys and feed attributes
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One forecast entry parsed from the feed
///
/// Covers the half-open interval `[from, to)`. Windows keep the order they
/// appeared in the feed; the resolver never re-sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastWindow {
    /// Start of the window (inclusive)
    pub from: NaiveDateTime,
    /// End of the window (exclusive)
    pub to: NaiveDateTime,
    /// The feed's `period` attribute, when present
    pub period: Option<u32>,
    /// Forecast temperature in whole degrees Celsius
    pub temperature: i32,
}

impl ForecastWindow {
    /// Whether this window covers the given instant.
    ///
    /// The interval is half-open: `from` is inclusive, `to` is exclusive.
    pub fn covers(&self, time: NaiveDateTime) -> bool {
        time >= self.from && time < self.to
    }
}

/// Renders the canonical cache key for a requested instant.
///
/// ISO-8601 local date-time at second precision, no offset
/// (e.g. `2018-02-11T23:00:00`). The result round-trips through
/// `NaiveDateTime::parse_from_str` with [`TIME_FORMAT`].
pub fn canonical_key(time: NaiveDateTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
