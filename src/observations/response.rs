//! Serde model of the `tideObsTemp` JSON body.
//!
//! A successful day looks like
//!
//! ```json
//! {"result": {"meta": {"obs_post_id": "DT_0005", "obs_post_name": "Busan", ...},
//!             "data": [{"record_time": "2024-08-01 09:00:00", "water_temp": "24.1"}, ...]}}
//! ```
//!
//! while unknown keys, codes or dates come back as `{"result": {"error": "..."}}`.

use crate::types::time_filter::TIME_FORMAT;
use crate::types::date_range::DATE_FORMAT;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub result: Option<ApiResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiResult {
    #[serde(default)]
    pub meta: Option<ApiMeta>,
    #[serde(default)]
    pub data: Option<Vec<RawRecord>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Station metadata. Only used for logging.
#[derive(Debug, Default, Deserialize)]
pub struct ApiMeta {
    #[serde(default)]
    pub obs_post_id: Option<String>,
    #[serde(default)]
    pub obs_post_name: Option<String>,
}

/// One element of `result.data`. Other fields the API may add are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub record_time: Option<String>,
    #[serde(default)]
    pub water_temp: Option<Value>,
}

impl ApiResponse {
    /// The `result.data` array, or `None` when the body carries no data.
    pub fn into_records(self) -> Option<Vec<RawRecord>> {
        self.result.and_then(|result| result.data)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.result.as_ref().and_then(|r| r.error.as_deref())
    }

    pub fn station_name(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|r| r.meta.as_ref())
            .and_then(|m| m.obs_post_name.as_deref())
    }
}

impl RawRecord {
    pub fn new(record_time: impl Into<String>, water_temp: Option<Value>) -> Self {
        Self {
            record_time: Some(record_time.into()),
            water_temp,
        }
    }

    /// Parses `record_time` as `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let record_time = self.record_time.as_deref()?;
        let format = format!("{} {}", DATE_FORMAT, TIME_FORMAT);
        NaiveDateTime::parse_from_str(record_time, &format).ok()
    }

    /// The temperature as text, ready for numeric coercion.
    ///
    /// The API sends strings, but numbers are accepted too. `null`, booleans and
    /// nested values yield `None`.
    pub fn water_temp_text(&self) -> Option<String> {
        match self.water_temp.as_ref()? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

pub fn parse_body(body: &str) -> Result<ApiResponse, serde_json::Error> {
    serde_json::from_str(body)
}
