//! Raw lines -> `TimeSeries`.
//!
//! Each line is a comma-delimited row of its own; a record never spans a
//! line boundary, so an unbalanced quote can only affect the line it is on.
//! Only the first two fields (date, weight) are read and anything after them
//! is ignored. A row whose date field is the literal `date` is the header and
//! is skipped. Blank lines at the end of the input are dropped. Any other row
//! that fails to parse, blank ones included, rejects the whole input: there is
//! no partial series.
//!
//! Row order is preserved exactly. No sorting happens here or downstream.

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{Observation, TimeSeries};
use crate::error::SeriesError;

/// Date field value that marks the header row.
pub const HEADER_TOKEN: &str = "date";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse raw lines into a series in input order.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<TimeSeries, SeriesError> {
    let data_len = lines
        .iter()
        .rposition(|l| !l.as_ref().trim().is_empty())
        .map_or(0, |i| i + 1);

    let mut observations = Vec::with_capacity(data_len);
    for (idx, raw) in lines[..data_len].iter().enumerate() {
        if let Some(obs) = parse_line(raw.as_ref(), idx as u64 + 1)? {
            observations.push(obs);
        }
    }

    tracing::info!(rows = observations.len(), "parsed weight series");
    Ok(TimeSeries::new(observations))
}

/// `Ok(None)` for the header row.
fn parse_line(raw: &str, line: u64) -> Result<Option<Observation>, SeriesError> {
    let fail = |reason: String| SeriesError::Parse {
        line,
        content: raw.to_string(),
        reason,
    };

    if raw.trim().is_empty() {
        return Err(fail("blank line".to_string()));
    }

    let record = read_record(raw).map_err(|e| fail(format!("malformed row: {e}")))?;

    let date_field = record
        .get(0)
        .map(|s| s.trim_start_matches('\u{feff}'))
        .unwrap_or_default();
    if date_field == HEADER_TOKEN {
        return Ok(None);
    }

    let weight_field = record
        .get(1)
        .ok_or_else(|| fail("missing weight field".to_string()))?;

    let date = parse_date(date_field).map_err(&fail)?;
    let weight = parse_weight(weight_field).map_err(&fail)?;
    Ok(Some(Observation { date, weight }))
}

/// Read a single line as one CSV record.
fn read_record(raw: &str) -> csv::Result<StringRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn parse_weight(s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("invalid weight '{s}'"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("weight must be a positive number, got '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn header_is_skipped_and_rows_keep_their_order() {
        let lines = ["date,weight", "2024-01-01,180.0", "2024-01-05,179.2", "2024-01-10,178.5"];
        let series = parse_lines(&lines).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.dates().collect::<Vec<_>>(),
            vec![d(2024, 1, 1), d(2024, 1, 5), d(2024, 1, 10)]
        );
        assert_eq!(series.weights().collect::<Vec<_>>(), vec![180.0, 179.2, 178.5]);

        let view = series.trailing_days(5).unwrap();
        assert_eq!(view.dates().collect::<Vec<_>>(), vec![d(2024, 1, 5), d(2024, 1, 10)]);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let lines = ["date,weight,notes,bf%", "2024-02-01,175.5,\"after run, tired\",18.2"];
        let series = parse_lines(&lines).unwrap();
        assert_eq!(series.observations(), &[Observation::new(d(2024, 2, 1), 175.5)]);
    }

    #[test]
    fn rows_are_not_sorted() {
        let lines = ["2024-03-02,170.0", "2024-03-01,171.0"];
        let series = parse_lines(&lines).unwrap();
        assert_eq!(series.first_date(), Some(d(2024, 3, 2)));
    }

    #[test]
    fn bad_date_rejects_whole_input() {
        let lines = ["date,weight", "2024-01-01,180.0", "2024-13-01,179.0", "2024-01-03,178.0"];
        match parse_lines(&lines) {
            Err(SeriesError::Parse { line, content, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "2024-13-01,179.0");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_or_non_positive_weight_is_an_error() {
        assert!(matches!(parse_lines(&["2024-01-01,heavy"]), Err(SeriesError::Parse { .. })));
        assert!(matches!(parse_lines(&["2024-01-01,NaN"]), Err(SeriesError::Parse { .. })));
        assert!(matches!(parse_lines(&["2024-01-01,-3"]), Err(SeriesError::Parse { .. })));
        assert!(matches!(parse_lines(&["2024-01-01"]), Err(SeriesError::Parse { .. })));
    }

    #[test]
    fn header_only_or_blank_input_is_an_empty_series() {
        assert!(parse_lines(&["date,weight"]).unwrap().is_empty());
        assert!(parse_lines::<&str>(&[]).unwrap().is_empty());
        assert!(parse_lines(&["", "  "]).unwrap().is_empty());
        assert_eq!(parse_lines(&["date,weight", "2024-01-01,180", "", ""]).unwrap().len(), 1);
    }

    #[test]
    fn blank_line_between_rows_is_an_error() {
        match parse_lines(&["date,weight", "", "2024-01-01,180"]) {
            Err(SeriesError::Parse { line, content, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn unbalanced_quote_in_ignored_field_stays_on_its_line() {
        let lines = [
            "date,weight,note",
            "2024-01-01,180.0,\"felt ok",
            "2024-01-02,179.5,x",
            "2024-01-03,179.0,y",
        ];
        let series = parse_lines(&lines).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.dates().collect::<Vec<_>>(),
            vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]
        );
        assert_eq!(series.weights().collect::<Vec<_>>(), vec![180.0, 179.5, 179.0]);
    }

    #[test]
    fn unbalanced_quote_in_date_field_reports_only_that_line() {
        let lines = ["date,weight", "\"2024-01-01,180.0", "2024-01-02,179.5"];
        match parse_lines(&lines) {
            Err(SeriesError::Parse { line, content, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "\"2024-01-01,180.0");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bom_before_header_is_tolerated() {
        let series = parse_lines(&["\u{feff}date,weight", "2024-01-01, 180.0 "]).unwrap();
        assert_eq!(series.len(), 1);
    }
}
