//! `weight-log` library crate.
//!
//! The binary (`wlt`) is a thin wrapper around this library so that:
//!
//! - the fetch/cache/parse/window core is testable without spawning processes
//! - front-ends (CLI, TUI) share one session and window model

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
