//! Error types.
//!
//! - `SeriesError`: typed failures of the fetch/cache/parse/window core
//! - `AppError`: process-boundary error carrying the exit code for `wlt`

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the acquisition and windowing core.
///
/// None of these are retried or swallowed; each one terminates the request
/// that triggered it.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// Network or sandboxed retrieval failed.
    #[error("failed to fetch '{url}': {reason}")]
    Fetch { url: String, reason: String },

    /// A non-header row could not be parsed. The whole parse is rejected.
    #[error("line {line}: {reason} (row: '{content}')")]
    Parse {
        line: u64,
        content: String,
        reason: String,
    },

    /// A trailing-window operation was asked for on a series with no data.
    #[error("series has no observations")]
    EmptySeries,

    /// Reading or writing the local cache artifact failed.
    #[error("cache file '{}': {source}", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SeriesError {
    pub fn exit_code(&self) -> u8 {
        match self {
            SeriesError::Fetch { .. } => 4,
            SeriesError::Parse { .. } | SeriesError::EmptySeries => 3,
            SeriesError::Cache { .. } => 2,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_errors_map_to_exit_codes() {
        let fetch = SeriesError::Fetch {
            url: "https://example.invalid/w.csv".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(AppError::from(fetch).exit_code(), 4);

        let parse = SeriesError::Parse {
            line: 3,
            content: "2024-13-01,180".to_string(),
            reason: "invalid date".to_string(),
        };
        let app = AppError::from(parse);
        assert_eq!(app.exit_code(), 3);
        assert!(app.message().contains("2024-13-01,180"));

        assert_eq!(AppError::from(SeriesError::EmptySeries).exit_code(), 3);
    }
}
