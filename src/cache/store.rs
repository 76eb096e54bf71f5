//! File-backed temperature store
//!
//! Persists `(timestamp key, temperature)` pairs as whitespace-separated
//! tokens in a plain text file. The file is read in full on every lookup and
//! rewritten in full on every store; there is no locking, so concurrent
//! writers may interleave. Single-process use is assumed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

/// File name used inside the default cache directory
const STORE_FILE_NAME: &str = "temperatures.txt";

/// Errors from the persisted store
///
/// Malformed store *content* is never an error; only real I/O failures
/// surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("cache file I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Capability for looking up and persisting resolved temperatures
pub trait TemperatureStore {
    /// Returns the first stored temperature for `key`, scanning in store
    /// order, or `None` on a miss.
    fn lookup(&self, key: &str) -> Result<Option<i32>, StoreError>;

    /// Persists `value` under `key`, replacing any previous entry for the
    /// same key.
    fn store(&self, key: &str, value: i32) -> Result<(), StoreError>;
}

/// Store backed by a whitespace-delimited `key value` text file
///
/// A missing backing file is treated as an empty store. Both one-pair-per-line
/// and all-pairs-on-one-line layouts parse; lines with an odd token count and
/// pairs whose value is not an integer are skipped.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store at the XDG-compliant default location
    /// (`~/.cache/yrcast/temperatures.txt` on Linux).
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g. no
    /// home directory).
    pub fn new() -> Option<Self> {
        Some(Self {
            path: Self::default_path()?,
        })
    }

    /// Default store file path under the user cache directory.
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "yrcast")?;
        Some(project_dirs.cache_dir().join(STORE_FILE_NAME))
    }

    /// Creates a store backed by the given file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole backing file; a missing file is an empty store.
    fn read_contents(&self) -> Result<String, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Parses store contents into `(key, value)` entries in file order.
fn parse_entries(contents: &str) -> Vec<(String, i32)> {
    let mut entries = Vec::new();
    for line in contents.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() % 2 != 0 {
            debug!(line, "Skipping malformed cache line");
            continue;
        }
        for pair in tokens.chunks(2) {
            match pair[1].parse::<i32>() {
                Ok(value) => entries.push((pair[0].to_string(), value)),
                Err(_) => {
                    debug!(key = pair[0], raw = pair[1], "Skipping non-integer cache value");
                }
            }
        }
    }
    entries
}

/// Renders entries back into the one-pair-per-line layout.
fn render_entries(entries: &[(String, i32)]) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(key);
        out.push(' ');
        out.push_str(&value.to_string());
        out.push('\n');
    }
    out
}

impl TemperatureStore for FileStore {
    fn lookup(&self, key: &str) -> Result<Option<i32>, StoreError> {
        let contents = self.read_contents()?;
        Ok(parse_entries(&contents)
            .into_iter()
            .find(|(stored_key, _)| stored_key == key)
            .map(|(_, value)| value))
    }

    fn store(&self, key: &str, value: i32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.read_contents()?;
        let mut entries = parse_entries(&contents);
        entries.retain(|(stored_key, _)| stored_key != key);
        entries.push((key.to_string(), value));

        fs::write(&self.path, render_entries(&entries))?;
        debug!(key, value, "Stored temperature");
        Ok(())
    }
}
