//! Export a window to CSV or JSON.
//!
//! The CSV uses the same `date,weight` layout the source does, so an export
//! can be fed back in as a sandboxed source or a cache file.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::session::View;
use crate::domain::{Observation, TimeSeries};
use crate::error::AppError;

/// JSON export schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowFile {
    pub tool: String,
    pub title: String,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub observations: Vec<Observation>,
}

impl WindowFile {
    pub fn from_view(view: &View) -> Self {
        Self {
            tool: "wlt".to_string(),
            title: view.title(),
            first_date: view.series.first_date(),
            last_date: view.series.last_date(),
            observations: view.series.observations().to_vec(),
        }
    }
}

/// Write observations as `date,weight` CSV.
pub fn write_series_csv(path: &Path, series: &TimeSeries) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for obs in series.observations() {
        writer
            .serialize(obs)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;
    tracing::info!(path = %path.display(), rows = series.len(), "exported CSV");
    Ok(())
}

/// Write the view as pretty-printed JSON.
pub fn write_window_json(path: &Path, view: &View) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &WindowFile::from_view(view))
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    tracing::info!(path = %path.display(), rows = view.series.len(), "exported JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::Session;
    use crate::config::Settings;
    use crate::data::parse_lines;
    use crate::domain::{Selection, WindowSize};

    fn view() -> View {
        let history =
            parse_lines(&["date,weight", "2024-01-01,180.0", "2024-01-05,179.2", "2024-01-10,178.5"]).unwrap();
        Session::with_history(Settings::default(), history)
            .view(Selection::Days(WindowSize::Week))
            .unwrap()
    }

    fn read_window_json(path: &Path) -> WindowFile {
        serde_json::from_reader(File::open(path).unwrap()).unwrap()
    }

    #[test]
    fn csv_export_matches_the_source_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window.csv");
        let view = view();

        write_series_csv(&path, &view.series).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "date,weight\n2024-01-05,179.2\n2024-01-10,178.5\n");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(parse_lines(&lines).unwrap(), view.series);
    }

    #[test]
    fn json_export_carries_title_and_span() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window.json");
        let view = view();

        write_window_json(&path, &view).unwrap();
        let file = read_window_json(&path);

        assert_eq!(file, WindowFile::from_view(&view));
        assert_eq!(file.title, "Weight over the last 7 days");
        assert_eq!(file.observations.len(), 2);
        assert_eq!(file.first_date, NaiveDate::from_ymd_opt(2024, 1, 5));
    }
}
