//! Text output for the terminal.
//!
//! We keep formatting code in one place so output changes stay localized.

use crate::app::session::View;
use crate::domain::TimeSeries;

/// The text summary printed under a plot or by `wlt summary`.
pub fn format_summary(view: &View) -> String {
    let mut out = String::new();
    out.push_str(&view.title());
    out.push('\n');
    out.push_str(&view.series.summary());

    if let Some((lo, hi)) = view.series.weight_bounds() {
        out.push_str(&format!("\nweight: {lo:.1} .. {hi:.1} lbs"));
    }
    if let (Some(first), Some(last)) = (view.series.observations().first(), view.series.observations().last()) {
        if view.series.len() > 1 {
            out.push_str(&format!("\nchange: {:+.1} lbs", last.weight - first.weight));
        }
    }

    out
}

/// Per-observation table with the change since the previous weigh-in.
pub fn format_table(series: &TimeSeries) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<10} {:>8} {:>7}\n", "date", "weight", "delta"));
    out.push_str(&format!("{:-<10} {:-<8} {:-<7}\n", "", "", ""));

    let mut prev: Option<f64> = None;
    for obs in series.observations() {
        let delta = prev
            .map(|p| format!("{:+.1}", obs.weight - p))
            .unwrap_or_default();
        out.push_str(format!("{:<10} {:>8.1} {:>7}", obs.date, obs.weight, delta).trim_end());
        out.push('\n');
        prev = Some(obs.weight);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::app::session::Session;
    use crate::data::parse_lines;
    use crate::domain::{Selection, WindowSize};

    #[test]
    fn summary_lists_count_span_and_change() {
        let history = parse_lines(&["date,weight", "2024-01-01,180.0", "2024-01-05,179.2", "2024-01-10,178.5"]).unwrap();
        let session = Session::with_history(Settings::default(), history);
        let view = session.view(Selection::Days(WindowSize::Month)).unwrap();

        assert_eq!(
            format_summary(&view),
            "Weight over the last 30 days\n\
             Weight series\n\
             3 data points from 2024-01-01 to 2024-01-10\n\
             weight: 178.5 .. 180.0 lbs\n\
             change: -1.5 lbs"
        );
    }

    #[test]
    fn table_shows_deltas_between_weigh_ins() {
        let series = parse_lines(&["2024-01-01,180.0", "2024-01-05,179.2"]).unwrap();
        assert_eq!(
            format_table(&series),
            concat!(
                "date         weight   delta\n",
                "---------- -------- -------\n",
                "2024-01-01    180.0\n",
                "2024-01-05    179.2    -0.8\n",
            )
        );
    }
}
