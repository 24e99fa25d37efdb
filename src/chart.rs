//! Line chart rendering with `plotters`.
//!
//! The x axis is measured in fractional days since the first reading and labelled
//! with calendar dates, so the chart works the same for one reading per day or for
//! readings at irregular times.

use crate::types::reading::TemperatureSeries;
use chrono::{Duration, NaiveDateTime};
use log::info;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const SECONDS_PER_DAY: f64 = 86_400.0;
const MAX_X_LABELS: usize = 12;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No readings to plot")]
    EmptySeries,

    #[error("Invalid chart size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

fn draw_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Draw(err.to_string())
}

/// Size and colours of the rendered chart. Defaults to a 1000x600 white canvas
/// with a blue line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    /// RGB.
    pub line_color: [u8; 3],
    pub marker_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            line_color: [0, 0, 255],
            marker_size: 4,
        }
    }
}

impl ChartStyle {
    fn line_rgb(&self) -> RGBColor {
        let [r, g, b] = self.line_color;
        RGBColor(r, g, b)
    }

    fn check_size(&self) -> Result<(), ChartError> {
        // Leave room for the caption and both label areas.
        if self.width < 200 || self.height < 150 {
            return Err(ChartError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Bytes needed for an RGB8 buffer of this size.
    pub fn rgb_buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

fn day_offset(origin: NaiveDateTime, at: NaiveDateTime) -> f64 {
    (at - origin).num_seconds() as f64 / SECONDS_PER_DAY
}

fn format_day_offset(origin: NaiveDateTime, offset: f64) -> String {
    let at = origin + Duration::seconds((offset * SECONDS_PER_DAY).round() as i64);
    at.format("%Y-%m-%d").to_string()
}

/// X range in days, padded so single readings and end points stay off the frame.
pub(crate) fn padded_day_range(span_days: f64) -> (f64, f64) {
    if span_days <= 0.0 {
        return (-0.5, 0.5);
    }
    let pad = (span_days * 0.03).max(0.1);
    (-pad, span_days + pad)
}

/// Y range padded by 10%, or by half a degree when all readings are (nearly) equal.
pub(crate) fn padded_temperature_range(low: f64, high: f64) -> (f64, f64) {
    let spread = high - low;
    if spread < 0.1 {
        return (low - 0.5, high + 0.5);
    }
    (low - spread * 0.1, high + spread * 0.1)
}

/// Draws `series` onto `root`, filling the whole area.
///
/// # Errors
///
/// Returns [`ChartError::EmptySeries`] if there is nothing to plot (nothing is drawn
/// in that case) and [`ChartError::Draw`] if the backend fails.
pub fn render_series<DB: DrawingBackend>(
    series: &TemperatureSeries,
    style: &ChartStyle,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    let (first, last) = series.time_bounds().ok_or(ChartError::EmptySeries)?;
    let (low, high) = series
        .temperature_bounds()
        .ok_or(ChartError::EmptySeries)?;

    let (x_min, x_max) = padded_day_range(day_offset(first, last));
    let (y_min, y_max) = padded_temperature_range(low, high);
    let color = style.line_rgb();

    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(root)
        .caption(series.title(), ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(draw_err)?;

    let x_formatter = |x: &f64| format_day_offset(first, *x);
    let y_formatter = |y: &f64| format!("{:.1}", y);
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Water Temperature (°C)")
        .x_labels(series.readings.len().clamp(2, MAX_X_LABELS))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .draw()
        .map_err(draw_err)?;

    let points: Vec<(f64, f64)> = series
        .readings
        .iter()
        .map(|r| (day_offset(first, r.record_time), r.water_temp))
        .collect();

    chart
        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
        .map_err(draw_err)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, style.marker_size, color.filled())),
        )
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Renders into a freshly allocated RGB8 buffer of `style.width` x `style.height`.
pub fn render_rgb(series: &TemperatureSeries, style: &ChartStyle) -> Result<Vec<u8>, ChartError> {
    style.check_size()?;
    if series.readings.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    let mut buffer = vec![0u8; style.rgb_buffer_len()];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        render_series(series, style, &root)?;
    }
    Ok(buffer)
}

/// Renders to an image file; the format follows the extension (`.png` usually).
pub fn render_png(
    series: &TemperatureSeries,
    style: &ChartStyle,
    path: &Path,
) -> Result<(), ChartError> {
    style.check_size()?;
    if series.readings.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    render_series(series, style, &root)?;
    info!("Saved chart to {}", path.display());
    Ok(())
}
