//! Inclusive calendar-day ranges and the `AnyDate` conversion trait.

use crate::TideTempError;
use chrono::NaiveDate;
use std::fmt;
use std::fmt::{Display, Formatter};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Anything that can be resolved to a single calendar day.
///
/// Implemented for `NaiveDate` and for strings in `YYYY-MM-DD` form, so the
/// client accepts whatever the operator typed as well as already-parsed dates.
pub trait AnyDate {
    fn get_date(self) -> Option<NaiveDate>;
}

impl AnyDate for NaiveDate {
    fn get_date(self) -> Option<NaiveDate> {
        Some(self)
    }
}

impl AnyDate for &str {
    fn get_date(self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.trim(), DATE_FORMAT).ok()
    }
}

impl AnyDate for String {
    fn get_date(self) -> Option<NaiveDate> {
        self.as_str().get_date()
    }
}

impl AnyDate for &String {
    fn get_date(self) -> Option<NaiveDate> {
        self.as_str().get_date()
    }
}

/// A start and end day, both inclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parses both bounds as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`TideTempError::DateParsing`] naming the first bound that fails to parse.
    pub fn parse(start: &str, end: &str) -> Result<Self, TideTempError> {
        let start_date = start
            .get_date()
            .ok_or_else(|| TideTempError::DateParsing(start.to_string()))?;
        let end_date = end
            .get_date()
            .ok_or_else(|| TideTempError::DateParsing(end.to_string()))?;
        Ok(Self::new(start_date, end_date))
    }

    /// Every calendar day from `start` to `end`, in order. Empty when `start > end`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
