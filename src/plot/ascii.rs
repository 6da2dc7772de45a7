//! ASCII scatter plot of a weight window for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal or over ssh
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observations: `o`
//! - date axis: `-` with `+` at tick dates, labels underneath

use chrono::NaiveDate;

use crate::app::session::View;
use crate::domain::TickPolicy;

/// Render the view's observations as a `width` x `height` scatter plot.
pub fn render_ascii_plot(view: &View, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let series = &view.series;
    let (Some(x0), Some(x1)) = (
        series.dates().min(),
        series.dates().max(),
    ) else {
        return format!("{} | no observations in window\n", view.title());
    };
    let Some((lo, hi)) = series.weight_bounds() else {
        return format!("{} | no observations in window\n", view.title());
    };
    let span = (x1 - x0).num_days();
    let (y_min, y_max) = pad_range(lo, hi, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for obs in series.observations() {
        let x = map_x((obs.date - x0).num_days(), span, width);
        let y = map_y(obs.weight, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let (axis, labels) = date_axis(&view.ticks, x0, x1, width);

    let mut out = String::new();
    out.push_str(&format!(
        "{} | y=[{y_min:.1}, {y_max:.1}] lbs\n",
        view.title()
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&axis);
    out.push('\n');
    out.push_str(&labels);
    out.push('\n');
    out
}

/// Axis line plus a label row; labels that would overlap or overflow are dropped.
fn date_axis(ticks: &TickPolicy, x0: NaiveDate, x1: NaiveDate, width: usize) -> (String, String) {
    let span = (x1 - x0).num_days();
    let mut axis = vec!['-'; width];
    let mut labels = vec![' '; width];
    let mut next_free = 0usize;

    for date in ticks.ticks(x0, x1) {
        let x = map_x((date - x0).num_days(), span, width);
        axis[x] = '+';

        let label = ticks.label(date);
        let len = label.chars().count();
        if x >= next_free && x + len <= width {
            for (i, ch) in label.chars().enumerate() {
                labels[x + i] = ch;
            }
            next_free = x + len + 1;
        }
    }

    (axis.into_iter().collect(), labels.into_iter().collect())
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(0.5);
    (min - pad, max + pad)
}

fn map_x(offset_days: i64, span_days: i64, width: usize) -> usize {
    if span_days <= 0 {
        return 0;
    }
    let u = (offset_days as f64 / span_days as f64).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}
