use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::core::{DataType, parse_date_like};

/// Category labels longer than this are truncated on crowded band axes and,
/// when date-like, reformatted as short dates.
pub const MAX_CATEGORY_LABEL_CHARS: usize = 10;

/// Locale for tick label formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisLabelLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-ES")]
    EsEs,
}

impl AxisLabelLocale {
    fn short_date_pattern(self) -> &'static str {
        match self {
            Self::EnUs => "%m/%d/%Y",
            Self::EsEs => "%d/%m/%Y",
        }
    }
}

/// Shortest representation that round-trips: `5` rather than `5.0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0".
        return "0".to_owned();
    }
    format!("{value}")
}

/// Short UTC date for epoch milliseconds.
#[must_use]
pub fn format_date_millis(millis: f64, locale: AxisLabelLocale) -> String {
    if !millis.is_finite() {
        return format_number(millis);
    }
    match DateTime::from_timestamp_millis(millis.round() as i64) {
        Some(date) => date.format(locale.short_date_pattern()).to_string(),
        None => format_number(millis),
    }
}

/// Formats a continuous tick value by the axis data type.
#[must_use]
pub fn format_tick(value: f64, data_type: DataType, locale: AxisLabelLocale) -> String {
    match data_type {
        DataType::Number => format_number(value),
        DataType::Date => format_date_millis(value, locale),
    }
}

/// Formats a band-axis category; long date-like strings become short dates.
#[must_use]
pub fn format_category(label: &str, locale: AxisLabelLocale) -> String {
    if label.chars().count() > MAX_CATEGORY_LABEL_CHARS {
        if let Some(date) = parse_date_like(label) {
            return date.format(locale.short_date_pattern()).to_string();
        }
    }
    label.to_owned()
}

/// First `max_chars` characters of `label`.
#[must_use]
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    label.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_drop_the_fraction() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[test]
    fn dates_follow_the_locale() {
        let millis = 1_612_137_600_000.0; // 2021-02-01
        assert_eq!(format_date_millis(millis, AxisLabelLocale::EnUs), "02/01/2021");
        assert_eq!(format_date_millis(millis, AxisLabelLocale::EsEs), "01/02/2021");
    }

    #[test]
    fn long_date_categories_are_shortened() {
        assert_eq!(
            format_category("2021-02-01T00:00:00Z", AxisLabelLocale::EnUs),
            "02/01/2021"
        );
        assert_eq!(format_category("2021-02-01", AxisLabelLocale::EnUs), "2021-02-01");
        assert_eq!(format_category("Northwestern", AxisLabelLocale::EnUs), "Northwestern");
    }
}
