//! Domain types.
//!
//! - `Observation` / `TimeSeries`: the ordered weight history and its windowed views
//! - `WindowSize` / `Selection`: what part of the history a front-end asks for
//! - `TickPolicy`: date-axis density/format hint for chart renderers

pub mod series;
pub mod ticks;
pub mod window;

pub use series::*;
pub use ticks::*;
pub use window::*;
