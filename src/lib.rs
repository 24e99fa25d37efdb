//! Plot sea-water temperature at a fixed time of day from KHOA tidal observations.
//!
//! The pipeline fetches one day of observations per HTTP request, keeps the
//! readings whose time of day equals a filter such as `09:00:00`, cleans them with
//! Polars and renders a line chart with `plotters`.

mod chart;
mod config;
mod error;
mod observations;
mod tide_temp;
mod types;
mod utils;

pub use error::TideTempError;
pub use tide_temp::*;

pub use chart::{render_png, render_rgb, render_series, ChartError, ChartStyle};
pub use config::{ApiConfig, Config, ConfigError};

pub use observations::collect::collect_matching;
pub use observations::error::FetchError;
pub use observations::fetcher::{DailySource, KhoaFetcher};
pub use observations::response::{ApiResponse, RawRecord};

pub use types::date_range::{AnyDate, DateRange};
pub use types::reading::{CandidateReading, Reading, TemperatureSeries};
pub use types::time_filter::TimeOfDayFilter;
pub use types::water_temp_frame::WaterTempFrame;
