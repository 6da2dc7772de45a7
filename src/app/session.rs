//! The per-process session: the full weight history, fetched once, plus the
//! window derivation shared by the CLI and TUI front-ends.
//!
//! The session is an explicit value owned by the front-end. There is no
//! global state; "fetch once per run" means "open one `Session` per run".

use crate::config::Settings;
use crate::data::{Fetch, LocalCache, parse_lines};
use crate::domain::{Selection, TickPolicy, TimeSeries};
use crate::error::SeriesError;

/// A derived window ready for rendering.
#[derive(Debug, Clone)]
pub struct View {
    pub series: TimeSeries,
    pub selection: Selection,
    pub ticks: TickPolicy,
}

impl View {
    pub fn title(&self) -> String {
        self.selection.title()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    history: TimeSeries,
}

impl Session {
    /// Fetch (or load from cache) and parse the full history.
    pub fn open(settings: Settings) -> Result<Self, SeriesError> {
        let fetcher = settings.fetch_mode.fetcher();
        Self::open_with(settings, fetcher.as_ref())
    }

    /// Like `open`, with an explicit fetch strategy.
    pub fn open_with(settings: Settings, fetcher: &dyn Fetch) -> Result<Self, SeriesError> {
        let lines = if settings.fetch_mode.uses_cache() {
            LocalCache::new(settings.cache_path.clone()).load_or_fetch(&settings.source_url, fetcher)?
        } else {
            fetcher.fetch_lines(&settings.source_url)?
        };
        let history = parse_lines(&lines)?;
        Ok(Self::with_history(settings, history))
    }

    pub fn with_history(settings: Settings, history: TimeSeries) -> Self {
        Self { settings, history }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &TimeSeries {
        &self.history
    }

    pub fn view(&self, selection: Selection) -> Result<View, SeriesError> {
        let series = selection.apply(&self.history)?;
        let ticks = tick_policy(selection, &series);
        Ok(View {
            series,
            selection,
            ticks,
        })
    }
}

/// Trailing-day windows use their nominal length; count- and range-based
/// views use the span they actually cover.
fn tick_policy(selection: Selection, series: &TimeSeries) -> TickPolicy {
    let span = match selection {
        Selection::Days(window) => window.days() as i64,
        Selection::Last(_) | Selection::Range { .. } => match (series.first_date(), series.last_date()) {
            (Some(first), Some(last)) => (last - first).num_days().abs(),
            _ => 0,
        },
    };
    TickPolicy::for_span(span)
}
