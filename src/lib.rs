//! Fetch weight history from weightbot.com and normalize it into a
//! gap-free daily series.

pub mod services;
pub mod types;

pub use services::{normalize, ExportSource, SessionClient, Weightbot};
pub use types::{
    Credentials, MeasurementRecord, NormalizedSeries, Options, Result, SeriesStats,
    WeightbotError,
};
