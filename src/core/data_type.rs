use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::record::{Record, Value};
use crate::error::{ChartError, ChartResult};

/// Data type of a positional (x) field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Number,
    Date,
}

const DATE_TIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%b %d, %Y", "%B %d, %Y"];

/// Parses the date string shapes accepted as "date-like".
///
/// Zone-less inputs are interpreted as UTC.
#[must_use]
pub fn parse_date_like(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for pattern in DATE_TIME_PATTERNS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(parsed.and_utc());
        }
    }
    for pattern in DATE_PATTERNS {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, pattern) {
            return parsed.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    parse_year_or_month(text)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY` is January 1st, `YYYY-MM` the first of that month.
fn parse_year_or_month(text: &str) -> Option<NaiveDate> {
    let all_digits =
        |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    let (year, month) = match text.split_once('-') {
        Some((year, month)) if all_digits(month, 2) => (year, month.parse().ok()?),
        Some(_) => return None,
        None => (text, 1),
    };
    if !all_digits(year, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Infers whether `key` holds numbers or dates by sampling one record.
pub fn infer_data_type(sample: &Record, key: &str) -> ChartResult<DataType> {
    match sample.get(key) {
        Some(Value::Number(value)) if value.is_finite() => Ok(DataType::Number),
        Some(Value::Date(_)) => Ok(DataType::Date),
        Some(Value::Text(text)) if parse_date_like(text).is_some() => Ok(DataType::Date),
        Some(other) => Err(ChartError::UnsupportedDataType {
            key: key.to_owned(),
            value: other.to_string(),
        }),
        None => Err(ChartError::UnsupportedDataType {
            key: key.to_owned(),
            value: "<missing>".to_owned(),
        }),
    }
}

/// Typed accessor converting a record field into the scale's numeric domain.
///
/// Dates map to epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccessor {
    pub key: String,
    pub data_type: DataType,
}

impl FieldAccessor {
    #[must_use]
    pub fn new(key: impl Into<String>, data_type: DataType) -> Self {
        Self {
            key: key.into(),
            data_type,
        }
    }

    #[must_use]
    pub fn number(key: impl Into<String>) -> Self {
        Self::new(key, DataType::Number)
    }

    #[must_use]
    pub fn date(key: impl Into<String>) -> Self {
        Self::new(key, DataType::Date)
    }

    #[must_use]
    pub fn value(&self, record: &Record) -> Option<f64> {
        let value = record.get(&self.key)?;
        match self.data_type {
            DataType::Number => value.as_f64(),
            // Raw numbers under a date encoding are already epoch milliseconds.
            DataType::Date => match value {
                Value::Number(millis) if millis.is_finite() => Some(*millis),
                other => other.as_time_millis(),
            },
        }
    }
}
