//! The time-series model: an ordered, immutable run of (date, weight)
//! observations plus the operations that derive windowed views from it.
//!
//! Every operation returns a fresh `TimeSeries`; nothing here mutates `self`.
//! Windowing assumes the observations are in ascending date order (the order
//! the source emits them in) but does not check or restore that order.

use std::fmt;
use std::ops::RangeBounds;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// Days per "month" for `trailing_months`. A fixed approximation, not
/// calendar arithmetic.
pub const DAYS_PER_MONTH: u64 = 30;

/// Days per week for `trailing_weeks`.
pub const DAYS_PER_WEEK: u64 = 7;

/// A single dated weight reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub weight: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, weight: f64) -> Self {
        Self { date, weight }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Build a series from parallel date/weight columns.
    ///
    /// Returns `None` when the columns have different lengths.
    pub fn from_columns(dates: Vec<NaiveDate>, weights: Vec<f64>) -> Option<Self> {
        if dates.len() != weights.len() {
            return None;
        }
        let observations = dates
            .into_iter()
            .zip(weights)
            .map(|(date, weight)| Observation { date, weight })
            .collect();
        Some(Self { observations })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn dates(&self) -> impl ExactSizeIterator<Item = NaiveDate> + '_ {
        self.observations.iter().map(|o| o.date)
    }

    pub fn weights(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.weight)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Minimum and maximum weight in the view, if any.
    pub fn weight_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.weights();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), w| (lo.min(w), hi.max(w))))
    }

    /// Observations dated within `[start, end]`, both ends inclusive.
    ///
    /// `end = None` means today's local date, evaluated at call time.
    pub fn filter_range(&self, start: NaiveDate, end: Option<NaiveDate>) -> TimeSeries {
        let end = end.unwrap_or_else(|| Local::now().date_naive());
        let observations = self
            .observations
            .iter()
            .filter(|o| o.date >= start && o.date <= end)
            .copied()
            .collect();
        TimeSeries { observations }
    }

    /// Observations from `start` up to and including today.
    pub fn filter_since(&self, start: NaiveDate) -> TimeSeries {
        self.filter_range(start, None)
    }

    /// The window `[last - n days, last]`, anchored on the series' own last
    /// observation rather than on today.
    pub fn trailing_days(&self, n: u64) -> Result<TimeSeries, SeriesError> {
        let end = self.last_date().ok_or(SeriesError::EmptySeries)?;
        let start = end.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN);
        tracing::debug!(%start, %end, days = n, "trailing window");
        Ok(self.filter_range(start, Some(end)))
    }

    pub fn trailing_weeks(&self, n: u64) -> Result<TimeSeries, SeriesError> {
        self.trailing_days(n.saturating_mul(DAYS_PER_WEEK))
    }

    pub fn trailing_months(&self, n: u64) -> Result<TimeSeries, SeriesError> {
        self.trailing_days(n.saturating_mul(DAYS_PER_MONTH))
    }

    /// The final `n` observations by position (all of them if `n >= len`).
    pub fn last_n(&self, n: usize) -> TimeSeries {
        let skip = self.observations.len().saturating_sub(n);
        TimeSeries {
            observations: self.observations[skip..].to_vec(),
        }
    }

    /// A one-observation view at `index`.
    pub fn get(&self, index: usize) -> Option<TimeSeries> {
        self.observations.get(index).map(|o| TimeSeries {
            observations: vec![*o],
        })
    }

    /// A positional sub-range view; `None` if the range is out of bounds.
    pub fn slice<R>(&self, range: R) -> Option<TimeSeries>
    where
        R: RangeBounds<usize>,
    {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.observations.get(bounds).map(|obs| TimeSeries {
            observations: obs.to_vec(),
        })
    }

    /// One-line-plus-count description of the view.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weight series")?;
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => {
                write!(f, "{} data points from {first} to {last}", self.len())
            }
            _ => write!(f, "0 data points"),
        }
    }
}

impl FromIterator<Observation> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}
