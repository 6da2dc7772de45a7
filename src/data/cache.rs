//! Local cache of the last fetched payload.
//!
//! Once the cache file exists it is always preferred over the network. It
//! never expires and is never revalidated; deleting the file is the only way
//! to force a re-download.
//!
//! A fresh payload is written to a temporary file next to the cache and
//! renamed into place, so the cache file is either complete or absent.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::data::fetch::{Fetch, split_lines};
use crate::error::SeriesError;

/// Default cache artifact, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = "weight.csv";

#[derive(Debug, Clone)]
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Return the cached lines, or fetch `url`, persist the payload, and
    /// return the fresh lines.
    ///
    /// A failed fetch or a failed write leaves no cache file behind.
    pub fn load_or_fetch(&self, url: &str, fetcher: &dyn Fetch) -> Result<Vec<String>, SeriesError> {
        if self.exists() {
            tracing::info!(path = %self.path.display(), "using local copy of weight data");
            let payload = std::fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
            return Ok(split_lines(&payload));
        }

        let payload = fetcher.fetch(url)?;
        self.persist(&payload)?;
        tracing::info!(path = %self.path.display(), bytes = payload.len(), "cached weight data");
        Ok(split_lines(&payload))
    }

    /// Write `payload` to a sibling temp file, then rename it over the cache
    /// path. The temp file is removed if any step fails.
    fn persist(&self, payload: &str) -> Result<(), SeriesError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| self.io_error(source))?;
        tmp.write_all(payload.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| self.io_error(source))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> SeriesError {
        SeriesError::Cache {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for LocalCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_FILE)
    }
}
