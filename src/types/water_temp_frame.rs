//! Contains the `WaterTempFrame` structure that cleans filtered readings with Polars.

use crate::types::reading::{CandidateReading, Reading};
use crate::TideTempError;
use chrono::DateTime;
use polars::prelude::*;

/// A wrapper around a Polars `LazyFrame` holding water-temperature readings.
///
/// The frame has two columns:
///
/// * `record_time` - `Datetime[ms]`, timezone-naive.
/// * `water_temp` - the temperature exactly as the API sent it (`String`) until
///   [`WaterTempFrame::clean`] coerces it to `Float64`.
///
/// Nothing is computed until [`WaterTempFrame::collect_readings`] is called.
#[derive(Clone)]
pub struct WaterTempFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl WaterTempFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Builds a frame from readings that already passed the time-of-day filter.
    ///
    /// # Errors
    ///
    /// Returns [`TideTempError::DataFrame`] if Polars fails to assemble the columns.
    pub fn from_candidates(candidates: &[CandidateReading]) -> Result<Self, TideTempError> {
        let record_times: Vec<i64> = candidates
            .iter()
            .map(|c| c.record_time.and_utc().timestamp_millis())
            .collect();
        let water_temps: Vec<Option<String>> =
            candidates.iter().map(|c| c.water_temp.clone()).collect();

        let df = polars::df!(
            "record_time" => record_times,
            "water_temp" => water_temps,
        )?;

        Ok(Self::new(df.lazy().with_column(
            col("record_time").cast(DataType::Datetime(TimeUnit::Milliseconds, None)),
        )))
    }

    /// Coerces temperatures to numbers and drops what cannot be plotted.
    ///
    /// * `water_temp` is cast to `Float64` non-strictly, so text like `"-"` becomes null.
    /// * Rows with a null temperature are dropped.
    /// * Duplicate rows are dropped, keeping the first occurrence.
    /// * The result is sorted by `record_time`.
    pub fn clean(&self) -> WaterTempFrame {
        WaterTempFrame::new(
            self.frame
                .clone()
                .with_column(col("water_temp").cast(DataType::Float64))
                .filter(col("water_temp").is_not_null())
                .unique_stable(None, UniqueKeepStrategy::First)
                .sort(
                    ["record_time"],
                    SortMultipleOptions::default().with_maintain_order(true),
                ),
        )
    }

    /// Collects the frame and converts its rows into [`Reading`]s.
    ///
    /// Rows whose temperature is not finite (the API occasionally sends `"NaN"`)
    /// are skipped here, since the non-strict cast keeps them as numbers.
    ///
    /// # Errors
    ///
    /// Returns [`TideTempError::DataFrame`] if collecting or casting fails, or
    /// [`TideTempError::ColumnNotFound`] if a column is missing.
    pub fn collect_readings(&self) -> Result<Vec<Reading>, TideTempError> {
        let df = self.frame.clone().collect()?;

        let record_times = df
            .column("record_time")
            .map_err(|e| TideTempError::ColumnNotFound("record_time".to_string(), e))?
            .cast(&DataType::Int64)?;
        let water_temps = df
            .column("water_temp")
            .map_err(|e| TideTempError::ColumnNotFound("water_temp".to_string(), e))?
            .cast(&DataType::Float64)?;

        let readings = record_times
            .i64()?
            .into_iter()
            .zip(water_temps.f64()?.into_iter())
            .filter_map(|(millis, temp)| {
                let record_time = DateTime::from_timestamp_millis(millis?)?.naive_utc();
                let water_temp = temp.filter(|t| t.is_finite())?;
                Some(Reading {
                    record_time,
                    water_temp,
                })
            })
            .collect();

        Ok(readings)
    }
}
