//! Data acquisition.
//!
//! fetch (network or sandbox) -> local cache -> parse -> `TimeSeries`

pub mod cache;
pub mod fetch;
pub mod parse;

pub use cache::{DEFAULT_CACHE_FILE, LocalCache};
pub use fetch::{Fetch, FetchMode, HttpFetcher, SandboxFetcher};
pub use parse::parse_lines;
