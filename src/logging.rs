//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays clean for summaries, plots and pipes.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter for line-oriented commands.
pub const CLI_FILTER: &str = "wlt=info";

/// Default filter for the TUI; any stderr output would tear the alternate screen.
pub const TUI_FILTER: &str = "off";

pub fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init();
}
