//! Forecast temperature resolution
//!
//! Orchestrates the temperature store and the feed fetcher: check the store,
//! on a miss fetch and parse the feed, scan the windows in feed order,
//! persist the matched temperature, and return it. The store is the only
//! reason repeated requests for the same instant do not re-fetch the feed.

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::debug;

use crate::cache::{StoreError, TemperatureStore};
use crate::data::{canonical_key, parse_forecast, FetchError, ForecastFetcher, ParseError};

/// Failure kinds of a temperature resolution
///
/// A closed set so callers can branch on the variant directly instead of
/// inspecting error subtypes.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The feed could not be retrieved
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The feed was retrieved but could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The feed parsed but no window covers the requested time
    #[error("no forecast window covers {0}")]
    TemperatureNotFound(NaiveDateTime),

    /// The cache store failed with an I/O error
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves forecast temperatures through a cache-first lookup
pub struct ForecastResolver<F, S> {
    fetcher: F,
    store: S,
}

impl<F, S> ForecastResolver<F, S>
where
    F: ForecastFetcher,
    S: TemperatureStore,
{
    /// Creates a resolver over the given fetcher and store.
    pub fn new(fetcher: F, store: S) -> Self {
        Self { fetcher, store }
    }

    /// Resolves the temperature for the requested instant.
    ///
    /// Checks the store under the canonical key first; on a miss, fetches
    /// the feed, parses it, and returns the temperature of the first window
    /// (in feed order) covering `requested`. The result is stored before
    /// returning. When no window covers the requested time the store is left
    /// untouched.
    pub async fn temperature_at(&self, requested: NaiveDateTime) -> Result<i32, ResolveError> {
        let key = canonical_key(requested);

        if let Some(cached) = self.store.lookup(&key)? {
            debug!(%key, cached, "Cache hit");
            return Ok(cached);
        }
        debug!(%key, "Cache miss, fetching forecast");

        let feed = self.fetcher.fetch().await?;
        let windows = parse_forecast(&feed)?;

        // First window in feed order wins; windows are never re-sorted
        let temperature = windows
            .iter()
            .find(|window| window.covers(requested))
            .map(|window| window.temperature)
            .ok_or(ResolveError::TemperatureNotFound(requested))?;

        self.store.store(&key, temperature)?;
        Ok(temperature)
    }
}
