//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - opens the session (cache or fetch, then parse)
//! - derives the requested window
//! - prints summaries/plots, writes exports, or hands off to the TUI

use clap::Parser;

use crate::cli::{Command, ExportArgs, PlotArgs, SummaryArgs, TuiArgs, ViewArgs};
use crate::config::Settings;
use crate::error::AppError;
use crate::logging::{CLI_FILTER, TUI_FILTER, init_tracing};

pub mod session;

use session::Session;

/// Entry point for the `wlt` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `wlt` and `wlt -d 30` behave like `wlt tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Summary(args) => handle_summary(args),
        Command::Plot(args) => handle_plot(args),
        Command::Export(args) => handle_export(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn open_session(args: &ViewArgs) -> Result<Session, AppError> {
    init_tracing(CLI_FILTER);
    let settings = Settings::from_args(&args.source);
    Ok(Session::open(settings)?)
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let session = open_session(&args.view)?;
    let view = session.view(args.view.window.selection())?;

    println!("{}", crate::report::format_summary(&view));
    if args.table {
        println!();
        print!("{}", crate::report::format_table(&view.series));
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let session = open_session(&args.view)?;
    let view = session.view(args.view.window.selection())?;

    print!("{}", crate::plot::render_ascii_plot(&view, args.width, args.height));
    println!("{}", crate::report::format_summary(&view));
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let session = open_session(&args.view)?;
    let view = session.view(args.view.window.selection())?;

    if let Some(path) = &args.csv {
        crate::io::write_series_csv(path, &view.series)?;
    }
    if let Some(path) = &args.json {
        crate::io::write_window_json(path, &view)?;
    }

    println!("{}", crate::report::format_summary(&view));
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    init_tracing(TUI_FILTER);
    crate::tui::run(Settings::from_args(&args.source), args.days)
}

/// Rewrite argv so `wlt` defaults to `wlt tui`.
///
/// Rules:
/// - `wlt`                      -> `wlt tui`
/// - `wlt -d 30 ...`            -> `wlt tui -d 30 ...`
/// - `wlt --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "plot" | "export" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_and_leading_flags_open_the_tui() {
        assert_eq!(rewrite_args(argv(&["wlt"])), argv(&["wlt", "tui"]));
        assert_eq!(rewrite_args(argv(&["wlt", "-d", "30"])), argv(&["wlt", "tui", "-d", "30"]));
    }

    #[test]
    fn subcommands_and_help_are_left_alone() {
        assert_eq!(rewrite_args(argv(&["wlt", "summary"])), argv(&["wlt", "summary"]));
        assert_eq!(rewrite_args(argv(&["wlt", "--help"])), argv(&["wlt", "--help"]));
    }
}
