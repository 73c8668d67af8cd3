//! Series normalization service
//!
//! Turns the raw weightbot export into a dense daily series. The service
//! leaves out days with no logged weight; those days come back as
//! placeholder records so that every calendar day between the first and
//! last measurement is present exactly once.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::{MeasurementRecord, NormalizedSeries, Result, WeightbotError};

/// First line of every export
pub const EXPORT_HEADER: &str = "date, kilograms, pounds";

/// `YYYY-MM-DD, <kg>, <lb>` with optional whitespace around the commas
static DATA_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})\s*,\s*([0-9]+(?:\.[0-9]+)?)\s*,\s*([0-9]+(?:\.[0-9]+)?)$")
        .expect("valid regex")
});

/// Normalize a raw export into a gap-free series.
///
/// Header lines and blank lines are skipped. Any other line must match the
/// data line shape and carry a date strictly after the previous one.
/// Sequence numbers run over the dense output, starting at 1.
///
/// # Examples
/// ```
/// use weightbot::services::normalizer::normalize;
///
/// let raw = "date, kilograms, pounds\n2008-12-04, 80.9, 178.4\n2008-12-06, 81.9, 180.6\n";
/// let series = normalize(raw).unwrap();
/// assert_eq!(series.len(), 3);
/// assert!(series[1].is_placeholder());
/// ```
pub fn normalize(raw_export: &str) -> Result<NormalizedSeries> {
    let mut series = NormalizedSeries::new();
    let mut previous_date: Option<NaiveDate> = None;
    let mut next_sequence_number: u32 = 1;
    let mut measured = 0usize;

    for (index, line) in raw_export.lines().enumerate() {
        if line == EXPORT_HEADER || line.trim().is_empty() {
            continue;
        }

        let (date, kilograms, pounds) = parse_line(index + 1, line)?;

        if let Some(previous) = previous_date {
            if date <= previous {
                return Err(WeightbotError::NonChronologicalOrder {
                    previous,
                    current: date,
                });
            }

            // Fill skipped days between the two measurements
            let mut cursor = previous;
            while let Some(next) = cursor.succ_opt().filter(|d| *d < date) {
                series.push(MeasurementRecord::placeholder(next_sequence_number, next));
                next_sequence_number += 1;
                cursor = next;
            }
        }

        series.push(MeasurementRecord::measured(
            next_sequence_number,
            date,
            kilograms,
            pounds,
        ));
        next_sequence_number += 1;
        measured += 1;
        previous_date = Some(date);
    }

    tracing::debug!(
        measured,
        placeholders = series.len() - measured,
        "normalized weight series"
    );

    Ok(series)
}

/// Split a data line into its date and weight fields
fn parse_line(line_number: usize, line: &str) -> Result<(NaiveDate, &str, &str)> {
    let malformed = || WeightbotError::MalformedLine {
        line_number,
        line: line.to_string(),
    };

    let caps = DATA_LINE.captures(line.trim()).ok_or_else(malformed)?;
    let (Some(date), Some(kilograms), Some(pounds)) = (caps.get(1), caps.get(2), caps.get(3))
    else {
        return Err(malformed());
    };

    let date = NaiveDate::parse_from_str(date.as_str(), "%Y-%m-%d").map_err(|_| malformed())?;

    Ok((date, kilograms.as_str(), pounds.as_str()))
}
