//! Input/output helpers.
//!
//! - window exports (CSV/JSON) (`export`)

pub mod export;

pub use export::*;
