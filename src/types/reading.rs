use crate::types::date_range::DateRange;
use crate::types::time_filter::TimeOfDayFilter;
use chrono::NaiveDateTime;

/// One timestamped water-temperature observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub record_time: NaiveDateTime,
    /// Degrees Celsius.
    pub water_temp: f64,
}

/// A record that passed the time-of-day filter but whose temperature has not
/// been coerced to a number yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateReading {
    pub record_time: NaiveDateTime,
    pub water_temp: Option<String>,
}

/// Cleaned readings, sorted by time, together with the query that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSeries {
    pub range: DateRange,
    pub filter: TimeOfDayFilter,
    pub readings: Vec<Reading>,
}

impl TemperatureSeries {
    pub fn title(&self) -> String {
        format!(
            "Water Temperature from {} at {}",
            self.range, self.filter
        )
    }

    /// Lowest and highest temperature, `None` for an empty series.
    pub fn temperature_bounds(&self) -> Option<(f64, f64)> {
        self.readings.iter().fold(None, |acc, r| match acc {
            None => Some((r.water_temp, r.water_temp)),
            Some((lo, hi)) => Some((lo.min(r.water_temp), hi.max(r.water_temp))),
        })
    }

    /// Earliest and latest observation time, `None` for an empty series.
    pub fn time_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.readings.iter().map(|r| r.record_time).min()?;
        let last = self.readings.iter().map(|r| r.record_time).max()?;
        Some((first, last))
    }
}
