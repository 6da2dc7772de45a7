//! Command-line parsing for the weight log viewer.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! data acquisition and windowing.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::data::FetchMode;
use crate::domain::{Selection, WindowSize};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wlt", version, about = "Weight log tracker: fetch, cache and view a weight history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the observation count and date span of a window.
    Summary(SummaryArgs),
    /// Render a window as a terminal scatter plot.
    Plot(PlotArgs),
    /// Write a window to CSV and/or JSON.
    Export(ExportArgs),
    /// Launch the interactive TUI (the default).
    Tui(TuiArgs),
}

/// Where the weight history comes from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// URL of the CSV weight log.
    #[arg(long, env = "WLT_SOURCE_URL")]
    pub url: Option<String>,

    /// Local cache file. When it exists the network is never contacted.
    #[arg(long, env = "WLT_CACHE_PATH", value_name = "FILE")]
    pub cache: Option<PathBuf>,

    /// Fetch strategy: direct network access or the sandbox host.
    #[arg(long = "fetch", env = "WLT_FETCH_MODE", value_enum, default_value_t = FetchMode::Network)]
    pub fetch_mode: FetchMode,
}

/// Which part of the history to show.
#[derive(Debug, Args, Clone)]
pub struct WindowArgs {
    /// Trailing window in days, anchored on the last weigh-in.
    #[arg(short = 'd', long, value_enum, default_value_t = WindowSize::Quarter)]
    pub days: WindowSize,

    /// Show the last N weigh-ins instead of a date window.
    #[arg(long, value_name = "N", conflicts_with_all = ["since", "until"])]
    pub last: Option<usize>,

    /// Show weigh-ins from this date (YYYY-MM-DD) on.
    #[arg(long, value_name = "DATE")]
    pub since: Option<NaiveDate>,

    /// End of the `--since` range (inclusive). Defaults to today.
    #[arg(long, value_name = "DATE", requires = "since")]
    pub until: Option<NaiveDate>,
}

impl WindowArgs {
    pub fn selection(&self) -> Selection {
        if let Some(n) = self.last {
            return Selection::Last(n);
        }
        if let Some(start) = self.since {
            return Selection::Range {
                start,
                end: self.until,
            };
        }
        Selection::Days(self.days)
    }
}

#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Also list every weigh-in in the window.
    #[arg(long)]
    pub table: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
#[command(group(ArgGroup::new("target").required(true).multiple(true).args(["csv", "json"])))]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Write the window as `date,weight` CSV.
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Write the window as JSON.
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Initially selected window in days.
    #[arg(short = 'd', long, value_enum, default_value_t = WindowSize::Quarter)]
    pub days: WindowSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn window_flags_pick_the_selection() {
        let cli = Cli::parse_from(["wlt", "summary", "-d", "30"]);
        let Command::Summary(args) = cli.command else { panic!("expected summary") };
        assert_eq!(args.view.window.selection(), Selection::Days(WindowSize::Month));

        let cli = Cli::parse_from(["wlt", "summary", "--last", "12"]);
        let Command::Summary(args) = cli.command else { panic!("expected summary") };
        assert_eq!(args.view.window.selection(), Selection::Last(12));

        let cli = Cli::parse_from(["wlt", "summary", "--since", "2024-01-01", "--until", "2024-02-01"]);
        let Command::Summary(args) = cli.command else { panic!("expected summary") };
        assert_eq!(
            args.view.window.selection(),
            Selection::Range {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 2, 1),
            }
        );
    }

    #[test]
    fn unsupported_window_is_rejected() {
        assert!(Cli::try_parse_from(["wlt", "summary", "-d", "14"]).is_err());
        assert!(Cli::try_parse_from(["wlt", "export"]).is_err());
    }
}
