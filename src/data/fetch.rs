//! Remote retrieval of the raw CSV payload.
//!
//! Two interchangeable strategies, chosen explicitly at startup:
//! - `HttpFetcher`: direct network fetch
//! - `SandboxFetcher`: the sandboxed runtime's primitive, which resolves the
//!   resource through a host-mounted filesystem instead of the network
//!
//! Neither retries. A failed fetch is returned to the caller as-is.

use std::path::PathBuf;

use clap::ValueEnum;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// Capability to retrieve the raw text behind a source URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, SeriesError>;

    /// The payload split into lines.
    fn fetch_lines(&self, url: &str) -> Result<Vec<String>, SeriesError> {
        self.fetch(url).map(|payload| split_lines(&payload))
    }
}

/// Which fetch strategy the process runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    #[default]
    Network,
    Sandboxed,
}

impl FetchMode {
    pub fn fetcher(self) -> Box<dyn Fetch> {
        match self {
            FetchMode::Network => Box::new(HttpFetcher::new()),
            FetchMode::Sandboxed => Box::new(SandboxFetcher),
        }
    }

    /// Sandboxed runtimes have no persistent working directory, so the local
    /// cache only applies to networked runs.
    pub fn uses_cache(self) -> bool {
        matches!(self, FetchMode::Network)
    }
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, SeriesError> {
        tracing::info!(url, "downloading weight data");
        let fail = |reason: String| SeriesError::Fetch {
            url: url.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| fail(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(fail(format!("status {}", resp.status())));
        }

        resp.text()
            .map_err(|e| fail(format!("failed to read response body: {e}")))
    }
}

/// Fetch primitive for sandboxed runtimes without network access.
///
/// Accepts `file://` URLs or plain paths staged by the host.
pub struct SandboxFetcher;

impl SandboxFetcher {
    fn resolve(url: &str) -> PathBuf {
        PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
    }
}

impl Fetch for SandboxFetcher {
    fn fetch(&self, url: &str) -> Result<String, SeriesError> {
        let path = Self::resolve(url);
        tracing::info!(path = %path.display(), "reading weight data through sandbox host");
        std::fs::read_to_string(&path).map_err(|e| SeriesError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Split a payload into lines, dropping the line terminators.
pub fn split_lines(payload: &str) -> Vec<String> {
    payload.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_fetcher_reads_file_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weight.csv");
        std::fs::write(&path, "date,weight\r\n2024-01-01,180.0\r\n").unwrap();

        let url = format!("file://{}", path.display());
        let lines = SandboxFetcher.fetch_lines(&url).unwrap();
        assert_eq!(lines, vec!["date,weight", "2024-01-01,180.0"]);
    }

    #[test]
    fn sandbox_fetcher_missing_resource_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("missing.csv").display().to_string();
        assert!(matches!(SandboxFetcher.fetch(&url), Err(SeriesError::Fetch { .. })));
    }

    #[test]
    fn only_network_mode_uses_the_cache() {
        assert!(FetchMode::Network.uses_cache());
        assert!(!FetchMode::Sandboxed.uses_cache());
        assert_eq!(FetchMode::default(), FetchMode::Network);
    }
}
