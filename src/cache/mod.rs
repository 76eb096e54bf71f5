//! Persistent temperature cache
//!
//! This module provides the store that keeps resolved temperatures on disk so
//! repeated requests for the same instant never re-fetch the forecast feed.
//! The backing format is a plain text file of whitespace-separated
//! `key value` pairs; malformed content is skipped rather than rejected.

mod store;

pub use store::{FileStore, StoreError, TemperatureStore};
