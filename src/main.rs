// Prevent console window in addition to the Slint window in Windows release builds.
#![cfg_attr(
    all(feature = "gui", not(debug_assertions)),
    windows_subsystem = "windows"
)]

#[cfg(feature = "gui")]
mod app;

use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use tidetemp::{render_png, Config, DateRange, TemperatureSeries, TideTemp, TideTempError};

/// Plot sea-water temperature at one time of day across a range of days.
///
/// Without `--output` a window opens with the given values prefilled.
#[derive(Debug, Parser)]
#[command(name = "tidetemp", version, about)]
struct Cli {
    /// First day to fetch (YYYY-MM-DD).
    #[arg(long)]
    start: Option<String>,

    /// Last day to fetch, inclusive (YYYY-MM-DD).
    #[arg(long)]
    end: Option<String>,

    /// Time of day to keep (HH:MM:SS).
    #[arg(long = "time", value_name = "HH:MM:SS")]
    filter_time: Option<String>,

    /// Render the chart to this image file instead of opening a window.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file (TOML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Chart width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Chart height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

/// Text the operator entered, either on the command line or in the window.
#[derive(Debug, Clone, Default)]
pub(crate) struct PlotRequest {
    pub start: String,
    pub end: String,
    pub filter_time: String,
}

impl From<&Cli> for PlotRequest {
    fn from(cli: &Cli) -> Self {
        Self {
            start: cli.start.clone().unwrap_or_default(),
            end: cli.end.clone().unwrap_or_default(),
            filter_time: cli.filter_time.clone().unwrap_or_default(),
        }
    }
}

/// Parses the request and runs the pipeline.
pub(crate) fn query(
    client: &TideTemp,
    request: &PlotRequest,
) -> Result<TemperatureSeries, TideTempError> {
    let range = DateRange::parse(&request.start, &request.end)?;
    client
        .water_temperature()
        .start(range.start)
        .end(range.end)
        .filter_time(&request.filter_time)
        .call()
}

fn run_headless(client: &TideTemp, request: &PlotRequest, output: &Path) -> anyhow::Result<()> {
    if request.start.is_empty() || request.end.is_empty() || request.filter_time.is_empty() {
        anyhow::bail!("--start, --end and --time are required together with --output");
    }
    match query(client, request) {
        Ok(series) => {
            render_png(&series, client.chart_style(), output)?;
            info!("Figure created successfully.");
            Ok(())
        }
        Err(TideTempError::NoRecords { .. }) => {
            info!("No data available or figure creation failed.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(feature = "gui")]
fn run_gui(client: TideTemp, request: PlotRequest) -> anyhow::Result<()> {
    app::App::new(client, &request)?.run()
}

#[cfg(not(feature = "gui"))]
fn run_gui(_client: TideTemp, _request: PlotRequest) -> anyhow::Result<()> {
    anyhow::bail!("built without the `gui` feature, pass --output to render to a file")
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(width) = cli.width {
        config.chart.width = width;
    }
    if let Some(height) = cli.height {
        config.chart.height = height;
    }

    let client = TideTemp::with_config(config);
    let request = PlotRequest::from(&cli);

    match cli.output.as_deref() {
        Some(output) => run_headless(&client, &request, output),
        None => run_gui(client, request),
    }
}
