use std::cmp::Ordering;

use tracing::trace;

use crate::core::data_type::FieldAccessor;
use crate::core::record::{Record, Value};
use crate::error::{ChartError, ChartResult};

/// Collects distinct group values in first-seen order.
///
/// The order is never sorted: it drives stacking, legend and color order, and
/// must stay stable across re-renders. Empty group values are skipped.
pub fn collect_series_keys(records: &[Record], group_key: &str) -> ChartResult<Vec<String>> {
    let mut keys: Vec<String> = Vec::new();
    for (row, record) in records.iter().enumerate() {
        let value = record
            .get(group_key)
            .ok_or_else(|| ChartError::MissingGroupField {
                key: group_key.to_owned(),
                row,
            })?;
        let key = value.to_string();
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// Reshapes skinny `(x, group, y)` rows into one wide row per distinct x.
///
/// Output rows follow first-occurrence order of x. Each row carries the x field
/// and one field per series key; a missing `(x, group)` pair leaves that field
/// unset rather than zero. When several input rows match the same pair, the
/// last one wins. Rows without an x field are skipped.
#[must_use]
pub fn reshape_skinny_to_wide(
    records: &[Record],
    series_keys: &[String],
    group_key: &str,
    x_key: &str,
    y_key: &str,
) -> Vec<Record> {
    let mut x_values: Vec<&Value> = Vec::new();
    for record in records {
        if let Some(x) = record.get(x_key) {
            if !x_values.contains(&x) {
                x_values.push(x);
            }
        }
    }

    let mut wide = Vec::with_capacity(x_values.len());
    for x in x_values {
        let mut cells: Vec<Option<&Value>> = vec![None; series_keys.len()];
        for record in records.iter().filter(|record| record.get(x_key) == Some(x)) {
            let Some(group) = record.get(group_key).map(Value::to_string) else {
                continue;
            };
            if let Some(slot) = series_keys.iter().position(|key| *key == group) {
                cells[slot] = record.get(y_key);
            }
        }

        let mut row = Record::new().with(x_key, x.clone());
        for (key, cell) in series_keys.iter().zip(cells) {
            if let Some(value) = cell {
                row.insert(key.clone(), value.clone());
            }
        }
        wide.push(row);
    }

    trace!(
        input_rows = records.len(),
        wide_rows = wide.len(),
        series = series_keys.len(),
        "reshape skinny to wide"
    );
    wide
}

/// Returns rows ordered ascending by x; rows without a usable x sort last.
///
/// The sort is stable so equal x values keep their input order.
#[must_use]
pub fn order_rows_by_x(rows: &[Record], x: &FieldAccessor) -> Vec<Record> {
    let mut keyed: Vec<(Option<f64>, &Record)> =
        rows.iter().map(|record| (x.value(record), record)).collect();
    keyed.sort_by(|left, right| match (left.0, right.0) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_group_values_are_not_series() {
        let records = vec![
            Record::new().with("g", ""),
            Record::new().with("g", "a"),
            Record::new().with("g", "a"),
        ];
        let keys = collect_series_keys(&records, "g").expect("keys");
        assert_eq!(keys, vec!["a".to_owned()]);
    }

    #[test]
    fn numeric_group_values_are_stringified() {
        let records = vec![Record::new().with("g", 3), Record::new().with("g", 1.5)];
        let keys = collect_series_keys(&records, "g").expect("keys");
        assert_eq!(keys, vec!["3".to_owned(), "1.5".to_owned()]);
    }
}
