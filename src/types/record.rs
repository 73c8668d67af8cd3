//! Measurement types for the normalized weight series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the normalized series.
///
/// Measured records carry both weights as they appear in the export.
/// Placeholders fill calendar days the service left out and carry empty weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeasurementRecord {
    pub sequence_number: u32,
    pub date: NaiveDate,
    pub kilograms: String,
    pub pounds: String,
}

impl MeasurementRecord {
    pub fn measured(
        sequence_number: u32,
        date: NaiveDate,
        kilograms: impl Into<String>,
        pounds: impl Into<String>,
    ) -> Self {
        Self {
            sequence_number,
            date,
            kilograms: kilograms.into(),
            pounds: pounds.into(),
        }
    }

    pub fn placeholder(sequence_number: u32, date: NaiveDate) -> Self {
        Self {
            sequence_number,
            date,
            kilograms: String::new(),
            pounds: String::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kilograms.is_empty() && self.pounds.is_empty()
    }

    pub fn kilograms_value(&self) -> Option<f64> {
        self.kilograms.parse().ok()
    }
}

/// Dense, sequentially numbered series: one record per calendar day
pub type NormalizedSeries = Vec<MeasurementRecord>;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesStats {
    pub total_days: usize,
    pub measured_days: usize,
    pub placeholder_days: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub min_kilograms: Option<f64>,
    pub max_kilograms: Option<f64>,
}

impl SeriesStats {
    pub fn from_series(series: &[MeasurementRecord]) -> Self {
        let mut measured_days = 0;
        let mut min_kilograms: Option<f64> = None;
        let mut max_kilograms: Option<f64> = None;

        for record in series.iter().filter(|r| !r.is_placeholder()) {
            measured_days += 1;
            if let Some(kg) = record.kilograms_value() {
                min_kilograms = Some(min_kilograms.map_or(kg, |m| m.min(kg)));
                max_kilograms = Some(max_kilograms.map_or(kg, |m| m.max(kg)));
            }
        }

        Self {
            total_days: series.len(),
            measured_days,
            placeholder_days: series.len() - measured_days,
            first_date: series.first().map(|r| r.date),
            last_date: series.last().map(|r| r.date),
            min_kilograms,
            max_kilograms,
        }
    }
}
