use crate::chart::ChartError;
use crate::config::ConfigError;
use crate::observations::error::FetchError;
use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TideTempError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    DateParsing(String),

    #[error("No records found from {start} to {end} at {filter_time}")]
    NoRecords {
        start: NaiveDate,
        end: NaiveDate,
        filter_time: String,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),
}
