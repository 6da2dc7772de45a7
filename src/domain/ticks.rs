//! Date-axis tick policy for chart renderers.
//!
//! The window length only picks tick density and label format; it never
//! changes which observations are drawn.

use chrono::{Datelike, NaiveDate};

/// Where ticks fall on the date axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickRule {
    EveryDay,
    /// Specific days of every month.
    MonthDays(&'static [u32]),
    /// The 1st of every `every`-th month, counting from January.
    MonthStarts { every: u32 },
    YearStarts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPolicy {
    /// `chrono` strftime pattern for tick labels.
    pub format: &'static str,
    pub rule: TickRule,
}

/// (max window days, policy), checked in order.
const POLICIES: [(i64, TickPolicy); 5] = [
    (7, TickPolicy { format: "%b %d", rule: TickRule::EveryDay }),
    (30, TickPolicy { format: "%b %d", rule: TickRule::MonthDays(&[1, 8, 15, 22, 29]) }),
    (90, TickPolicy { format: "%b %d", rule: TickRule::MonthDays(&[1, 15]) }),
    (180, TickPolicy { format: "%b", rule: TickRule::MonthStarts { every: 1 } }),
    (365, TickPolicy { format: "%b %Y", rule: TickRule::MonthStarts { every: 2 } }),
];

const BEYOND_A_YEAR: TickPolicy = TickPolicy {
    format: "%Y",
    rule: TickRule::YearStarts,
};

impl TickPolicy {
    /// Pick the policy for a window spanning `days` days.
    pub fn for_span(days: i64) -> TickPolicy {
        POLICIES
            .iter()
            .find(|(max_days, _)| days <= *max_days)
            .map(|(_, policy)| *policy)
            .unwrap_or(BEYOND_A_YEAR)
    }

    pub fn is_tick(&self, date: NaiveDate) -> bool {
        match self.rule {
            TickRule::EveryDay => true,
            TickRule::MonthDays(days) => days.contains(&date.day()),
            TickRule::MonthStarts { every } => {
                date.day() == 1 && (date.month() - 1) % every.max(1) == 0
            }
            TickRule::YearStarts => date.ordinal() == 1,
        }
    }

    /// Tick dates within `[start, end]`, inclusive.
    pub fn ticks(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_tick(*d))
            .collect()
    }

    pub fn label(&self, date: NaiveDate) -> String {
        date.format(self.format).to_string()
    }
}
