//! The main entry point: runs the fetch, filter and clean pipeline for a date range.

use crate::chart::ChartStyle;
use crate::config::Config;
use crate::error::TideTempError;
use crate::observations::collect::collect_matching;
use crate::observations::fetcher::{DailySource, KhoaFetcher};
use crate::types::date_range::DateRange;
use crate::types::reading::TemperatureSeries;
use crate::types::time_filter::TimeOfDayFilter;
use crate::types::water_temp_frame::WaterTempFrame;
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};

/// Client that turns a date range and a time of day into a [`TemperatureSeries`].
///
/// By default it talks to the KHOA `tideObsTemp` service through [`KhoaFetcher`];
/// any other [`DailySource`] can be plugged in with [`TideTemp::with_source`].
///
/// # Examples
///
/// ```no_run
/// # use tidetemp::{TideTemp, TideTempError};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), TideTempError> {
/// let client = TideTemp::new()?;
/// let series = client
///     .water_temperature()
///     .start(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())
///     .end(NaiveDate::from_ymd_opt(2024, 8, 14).unwrap())
///     .filter_time("09:00:00")
///     .call()?;
/// println!("{} readings", series.readings.len());
/// # Ok(())
/// # }
/// ```
pub struct TideTemp<S = KhoaFetcher> {
    source: S,
    chart_style: ChartStyle,
}

impl TideTemp<KhoaFetcher> {
    /// Creates a client from the default configuration sources.
    ///
    /// # Errors
    ///
    /// Returns [`TideTempError::Config`] if a config file exists but cannot be read or parsed.
    pub fn new() -> Result<Self, TideTempError> {
        Ok(Self::with_config(Config::load(None)?))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            source: KhoaFetcher::new(config.api),
            chart_style: config.chart,
        }
    }
}

#[bon]
impl<S: DailySource> TideTemp<S> {
    pub fn with_source(source: S, chart_style: ChartStyle) -> Self {
        Self {
            source,
            chart_style,
        }
    }

    pub fn chart_style(&self) -> &ChartStyle {
        &self.chart_style
    }

    /// Fetches every day from `start` to `end` (inclusive) and returns the readings
    /// taken exactly at `filter_time` (`HH:MM:SS`), cleaned and sorted by time.
    ///
    /// Days that fail to download are skipped. Temperatures that are not numbers
    /// and duplicate readings are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TideTempError::NoRecords`] if nothing is left to plot, and
    /// [`TideTempError::DataFrame`] if Polars fails while cleaning.
    #[builder]
    pub fn water_temperature(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter_time: &str,
    ) -> Result<TemperatureSeries, TideTempError> {
        let range = DateRange::new(start, end);
        let filter = TimeOfDayFilter::new(filter_time);
        info!("Fetching data from {} at {}.", range, filter);

        if range.is_empty() {
            warn!("Start date {} is after end date {}, nothing to fetch", start, end);
        }
        if !filter.is_well_formed() {
            warn!(
                "Filter time '{}' is not in HH:MM:SS form and will not match any reading",
                filter
            );
        }

        let candidates = collect_matching(&self.source, &range, &filter);
        let readings = if candidates.is_empty() {
            Vec::new()
        } else {
            WaterTempFrame::from_candidates(&candidates)?
                .clean()
                .collect_readings()?
        };

        if readings.is_empty() {
            info!("No records found.");
            return Err(TideTempError::NoRecords {
                start,
                end,
                filter_time: filter.to_string(),
            });
        }

        info!(
            "{} readings left after cleaning {} candidates",
            readings.len(),
            candidates.len()
        );
        Ok(TemperatureSeries {
            range,
            filter,
            readings,
        })
    }
}
