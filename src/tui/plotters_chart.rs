//! Plotters-powered weight scatter chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use chrono::NaiveDate;
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct WeightChart<'a> {
    /// Observations as (day number since CE, weight).
    pub points: &'a [(f64, f64)],
    /// X bounds in day numbers since CE.
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// strftime pattern for date tick labels.
    pub date_format: &'a str,
    /// Tick positions (day numbers) picked by the tick policy.
    pub x_ticks: &'a [f64],
}

/// Roughly how many cells one date label needs.
const LABEL_CELLS: usize = 9;

/// Keep every k-th tick so labels fit in `width` cells.
fn thin_ticks(ticks: &[f64], width: u16) -> Vec<f64> {
    let room = (usize::from(width) / LABEL_CELLS).max(2);
    let step = ticks.len().div_ceil(room).max(1);
    ticks.iter().step_by(step).copied().collect()
}

/// Day number since CE (as used on the x axis) for a date.
pub fn day_number(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    f64::from(date.num_days_from_ce())
}

/// Inverse of [`day_number`], rounding to the nearest day.
pub fn day_from_number(v: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
}

fn format_day(v: f64, fmt: &str) -> String {
    day_from_number(v)
        .map(|d| d.format(fmt).to_string())
        .unwrap_or_default()
}

impl<'a> Widget for WeightChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let ticks = thin_ticks(self.x_ticks, area.width);
        let x_labels = ticks.len().max(1);

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d((x0..x1).with_key_points(ticks.clone()), y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(x_labels)
                .y_labels(5)
                .x_label_formatter(&|v| format_day(*v, self.date_format))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // `Circle` markers come out far too large through the ratatui
            // backend (pixel radius is mapped to canvas units), so each
            // weigh-in is a single colored pixel.
            let point_color = RGBColor(0, 255, 255);
            chart.draw_series(
                self.points
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), point_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_numbers_round_trip_through_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_day(day_number(date), "%b %d"), "Mar 15");
        assert_eq!(format_day(day_number(date) + 0.4, "%Y-%m-%d"), "2024-03-15");
    }

    #[test]
    fn ticks_are_thinned_to_the_available_width() {
        let ticks: Vec<f64> = (0..30).map(f64::from).collect();
        assert_eq!(thin_ticks(&ticks[..4], 200), vec![0.0, 1.0, 2.0, 3.0]);

        let thinned = thin_ticks(&ticks, 45);
        assert_eq!(thinned, vec![0.0, 6.0, 12.0, 18.0, 24.0]);
    }
}
