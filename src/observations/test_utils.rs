use crate::observations::error::FetchError;
use crate::observations::fetcher::DailySource;
use crate::observations::response::RawRecord;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde_json::json;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// June 2024, the month every in-memory fixture lives in.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

/// One record per minute starting at `start` (`HH:MM`), one per temperature.
pub fn minute_records(date: NaiveDate, start: &str, temps: &[&str]) -> Vec<RawRecord> {
    let start = NaiveTime::parse_from_str(start, "%H:%M").unwrap();
    temps
        .iter()
        .enumerate()
        .map(|(i, temp)| {
            let at = date.and_time(start) + Duration::minutes(i as i64);
            RawRecord::new(at.format("%Y-%m-%d %H:%M:%S").to_string(), Some(json!(temp)))
        })
        .collect()
}

/// In-memory [`DailySource`] that records which days were requested.
#[derive(Default)]
pub struct StaticSource {
    days: HashMap<NaiveDate, Vec<RawRecord>>,
    failing: HashSet<NaiveDate>,
    requested: RefCell<Vec<NaiveDate>>,
}

impl StaticSource {
    pub fn with_day(mut self, date: NaiveDate, records: Vec<RawRecord>) -> Self {
        self.days.insert(date, records);
        self
    }

    pub fn with_failure(mut self, date: NaiveDate) -> Self {
        self.failing.insert(date);
        self
    }

    pub fn requested(&self) -> Vec<NaiveDate> {
        self.requested.borrow().clone()
    }
}

impl DailySource for StaticSource {
    fn fetch_day(&self, date: NaiveDate) -> Result<Vec<RawRecord>, FetchError> {
        self.requested.borrow_mut().push(date);
        if self.failing.contains(&date) {
            let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
            return Err(FetchError::JsonParse(err));
        }
        Ok(self.days.get(&date).cloned().unwrap_or_default())
    }
}
