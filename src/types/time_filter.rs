use chrono::{NaiveDateTime, NaiveTime};
use std::fmt;
use std::fmt::{Display, Formatter};

pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";

/// Selects readings whose time of day, formatted as `HH:MM:SS`, equals the filter text.
///
/// The comparison is on the formatted string, so `"9:00:00"` never matches a
/// reading taken at `09:00:00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeOfDayFilter(String);

impl TimeOfDayFilter {
    pub fn new(filter_time: &str) -> Self {
        Self(filter_time.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, datetime: &NaiveDateTime) -> bool {
        datetime.format(TIME_FORMAT).to_string() == self.0
    }

    /// Whether the filter can match anything at all.
    pub fn is_well_formed(&self) -> bool {
        NaiveTime::parse_from_str(&self.0, TIME_FORMAT)
            .map(|t| t.format(TIME_FORMAT).to_string() == self.0)
            .unwrap_or(false)
    }
}

impl Display for TimeOfDayFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
