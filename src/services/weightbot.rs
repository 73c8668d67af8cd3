//! Lazily fetched, memoized access to one account's weight history

use crate::services::normalizer::normalize;
use crate::services::session::{ExportSource, SessionClient, DEFAULT_SITE};
use crate::types::{Credentials, MeasurementRecord, NormalizedSeries, Options, Result};

/// Entry point for raw and normalized weight data.
///
/// The export is fetched on first access of either kind and the series is
/// normalized on first access of `data()`. Both are kept for the lifetime of
/// the instance; failures are returned without touching either cache.
pub struct Weightbot<S: ExportSource = SessionClient> {
    credentials: Credentials,
    site: String,
    source: S,
    raw: Option<String>,
    series: Option<NormalizedSeries>,
}

impl Weightbot<SessionClient> {
    /// Create an instance backed by the weightbot.com session client.
    /// Fails on missing or empty credentials, before any network activity.
    pub fn from_options(options: Options) -> Result<Self> {
        Self::with_source(options, SessionClient::new())
    }
}

impl<S: ExportSource> Weightbot<S> {
    /// Create an instance backed by a custom export source
    pub fn with_source(options: Options, source: S) -> Result<Self> {
        let credentials = options.credentials()?;
        Ok(Self {
            credentials,
            site: options.site.unwrap_or_else(|| DEFAULT_SITE.to_string()),
            source,
            raw: options.raw_data,
            series: None,
        })
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// Raw export text, fetched at most once
    pub fn raw_data(&mut self) -> Result<&str> {
        let raw = match self.raw.take() {
            Some(raw) => raw,
            None => {
                tracing::debug!(site = %self.site, "fetching raw export");
                self.source.fetch_raw_export(&self.site, &self.credentials)?
            }
        };
        Ok(self.raw.insert(raw).as_str())
    }

    /// Dense daily series, normalized at most once
    pub fn data(&mut self) -> Result<&[MeasurementRecord]> {
        let series = match self.series.take() {
            Some(series) => series,
            None => normalize(self.raw_data()?)?,
        };
        Ok(self.series.insert(series).as_slice())
    }
}
