//! Runtime settings.
//!
//! Resolution order is CLI flag, then environment (`.env` is loaded by
//! `app::run` before argument parsing), then the defaults below.

use std::path::PathBuf;

use crate::cli::SourceArgs;
use crate::data::{DEFAULT_CACHE_FILE, FetchMode};

/// Published CSV export of the weight log sheet.
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/151vhoZ-kZCnVfIQ7h9-Csq1rTMoIgsOsyj_vDRtDMn0/export?gid=1991942286&format=csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source_url: String,
    pub cache_path: PathBuf,
    pub fetch_mode: FetchMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            fetch_mode: FetchMode::default(),
        }
    }
}

impl Settings {
    pub fn from_args(args: &SourceArgs) -> Self {
        let defaults = Settings::default();
        Self {
            source_url: args
                .url
                .clone()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.source_url),
            cache_path: args.cache.clone().unwrap_or(defaults.cache_path),
            fetch_mode: args.fetch_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_fall_back_to_defaults() {
        let args = SourceArgs {
            url: Some("  ".to_string()),
            cache: None,
            fetch_mode: FetchMode::Network,
        };
        assert_eq!(Settings::from_args(&args), Settings::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = SourceArgs {
            url: Some("file:///srv/weight.csv".to_string()),
            cache: Some(PathBuf::from("/tmp/w.csv")),
            fetch_mode: FetchMode::Sandboxed,
        };
        let settings = Settings::from_args(&args);
        assert_eq!(settings.source_url, "file:///srv/weight.csv");
        assert_eq!(settings.cache_path, PathBuf::from("/tmp/w.csv"));
        assert_eq!(settings.fetch_mode, FetchMode::Sandboxed);
    }
}
