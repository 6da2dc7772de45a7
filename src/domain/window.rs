//! Window selection: which slice of the full history a front-end wants.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::TimeSeries;
use crate::error::SeriesError;

/// The fixed set of trailing windows offered by the display shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum WindowSize {
    #[value(name = "7")]
    Week,
    #[value(name = "30")]
    Month,
    #[default]
    #[value(name = "90")]
    Quarter,
    #[value(name = "180")]
    HalfYear,
    #[value(name = "365")]
    Year,
}

impl WindowSize {
    pub const ALL: [WindowSize; 5] = [
        WindowSize::Week,
        WindowSize::Month,
        WindowSize::Quarter,
        WindowSize::HalfYear,
        WindowSize::Year,
    ];

    pub fn days(self) -> u64 {
        match self {
            WindowSize::Week => 7,
            WindowSize::Month => 30,
            WindowSize::Quarter => 90,
            WindowSize::HalfYear => 180,
            WindowSize::Year => 365,
        }
    }

    pub fn from_days(days: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.days() == days)
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    pub fn prev(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|w| *w == self).unwrap_or(0)
    }
}

/// How a view is cut out of the full history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Date-bounded trailing window anchored on the last observation.
    Days(WindowSize),
    /// The final `n` observations by position.
    Last(usize),
    /// Absolute inclusive date range; `end = None` means today.
    Range {
        start: NaiveDate,
        end: Option<NaiveDate>,
    },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Days(WindowSize::default())
    }
}

impl Selection {
    pub fn apply(&self, series: &TimeSeries) -> Result<TimeSeries, SeriesError> {
        match *self {
            Selection::Days(window) => series.trailing_days(window.days()),
            Selection::Last(n) => Ok(series.last_n(n)),
            Selection::Range { start, end } => Ok(series.filter_range(start, end)),
        }
    }

    /// Chart title for a view cut with this selection.
    pub fn title(&self) -> String {
        match *self {
            Selection::Days(window) => format!("Weight over the last {} days", window.days()),
            Selection::Last(n) => format!("Last {n} weigh-ins"),
            Selection::Range { start, end: Some(end) } => format!("Weight from {start} to {end}"),
            Selection::Range { start, end: None } => format!("Weight since {start}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    #[test]
    fn window_sizes_cycle_without_wrapping() {
        assert_eq!(WindowSize::Week.prev(), WindowSize::Week);
        assert_eq!(WindowSize::Week.next(), WindowSize::Month);
        assert_eq!(WindowSize::Year.next(), WindowSize::Year);
        assert_eq!(WindowSize::default().days(), 90);
        assert_eq!(WindowSize::from_days(180), Some(WindowSize::HalfYear));
        assert_eq!(WindowSize::from_days(14), None);
    }

    #[test]
    fn window_sizes_parse_from_day_counts() {
        assert_eq!(WindowSize::from_str("365", false), Ok(WindowSize::Year));
        assert!(WindowSize::from_str("12", false).is_err());
    }

    #[test]
    fn selection_dispatches_to_the_matching_operation() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let series: TimeSeries = (1..=20).map(|day| Observation::new(d(day), 170.0)).collect();

        let days = Selection::Days(WindowSize::Week).apply(&series).unwrap();
        assert_eq!(days.first_date(), Some(d(13)));

        let last = Selection::Last(3).apply(&series).unwrap();
        assert_eq!(last.first_date(), Some(d(18)));

        let range = Selection::Range { start: d(2), end: Some(d(4)) }.apply(&series).unwrap();
        assert_eq!(range.len(), 3);

        let empty = TimeSeries::default();
        assert!(Selection::default().apply(&empty).is_err());
        assert!(Selection::Last(5).apply(&empty).unwrap().is_empty());
    }
}
