slint::include_modules!();

use crate::{query, PlotRequest};
use log::{error, info};
use slint::{Image, Rgb8Pixel, SharedPixelBuffer};
use std::rc::Rc;
use tidetemp::{render_rgb, TideTemp, TideTempError};

const NO_RECORDS: &str = "No records found.";
const FIGURE_CREATED: &str = "Figure created successfully.";

/// Holds the window and the client the "Plot Data" button runs queries with.
///
/// The query runs on the UI thread, so the window does not repaint until the
/// last day has been fetched.
pub struct App {
    ui: AppWindow,
    client: Rc<TideTemp>,
}

impl App {
    pub fn new(client: TideTemp, request: &PlotRequest) -> anyhow::Result<Self> {
        let ui = AppWindow::new()?;
        ui.set_start_date(request.start.as_str().into());
        ui.set_end_date(request.end.as_str().into());
        ui.set_filter_time(request.filter_time.as_str().into());

        Ok(Self {
            ui,
            client: Rc::new(client),
        })
    }

    pub fn run(self) -> anyhow::Result<()> {
        let ui_handle = self.ui.as_weak();
        let client = self.client.clone();

        self.ui.on_plot_requested(move || {
            let Some(ui) = ui_handle.upgrade() else {
                return;
            };
            let request = PlotRequest {
                start: ui.get_start_date().to_string(),
                end: ui.get_end_date().to_string(),
                filter_time: ui.get_filter_time().to_string(),
            };

            match plot(&client, &request) {
                Ok(Some(image)) => {
                    info!("{}", FIGURE_CREATED);
                    ui.set_chart(image);
                    ui.set_status(FIGURE_CREATED.into());
                }
                // Keep whatever chart is currently shown.
                Ok(None) => ui.set_status(NO_RECORDS.into()),
                Err(e) => {
                    error!("Plotting failed: {:#}", e);
                    ui.set_status(format!("{:#}", e).into());
                }
            }
        });

        self.ui.run().map_err(|e| e.into())
    }
}

/// Runs the query and renders the chart into an image, `None` when nothing matched.
fn plot(client: &TideTemp, request: &PlotRequest) -> anyhow::Result<Option<Image>> {
    let series = match query(client, request) {
        Ok(series) => series,
        Err(TideTempError::NoRecords { .. }) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let style = client.chart_style();
    let pixels = render_rgb(&series, style)?;
    let mut buffer = SharedPixelBuffer::<Rgb8Pixel>::new(style.width, style.height);
    buffer.make_mut_bytes().copy_from_slice(&pixels);
    Ok(Some(Image::from_rgb8(buffer)))
}
