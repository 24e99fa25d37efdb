use chrono::NaiveDate;
use std::path::Path;
use tidetemp::{render_png, TideTemp, TideTempError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let client = TideTemp::new()?;
    let start = NaiveDate::from_ymd_opt(2024, 8, 1).ok_or("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2024, 8, 7).ok_or("invalid end date")?;

    let series = match client
        .water_temperature()
        .start(start)
        .end(end)
        .filter_time("09:00:00")
        .call()
    {
        Ok(series) => series,
        Err(TideTempError::NoRecords { .. }) => {
            println!("No records found for {} to {}.", start, end);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    for reading in &series.readings {
        println!("{}  {:.2} °C", reading.record_time, reading.water_temp);
    }

    let output = Path::new("plot_week.png");
    render_png(&series, client.chart_style(), output)?;
    println!("Wrote {}", output.display());

    Ok(())
}
