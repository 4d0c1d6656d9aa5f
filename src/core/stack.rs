use serde::{Deserialize, Serialize};

use crate::core::record::Record;

/// Cumulative lower/upper bound of one series at one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackPoint {
    pub y0: f64,
    pub y1: f64,
    /// Index of the originating row in the stacked input.
    pub row: usize,
}

impl StackPoint {
    /// The series' own contribution at this row.
    #[must_use]
    pub fn value(self) -> f64 {
        self.y1 - self.y0
    }
}

/// One stacked series: a band per input row, in input row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub key: String,
    /// Position of this series in the stacking order.
    pub index: usize,
    pub points: Vec<StackPoint>,
}

/// Stacks `series_keys` over `rows`, bottom to top in key order.
///
/// For every row, `y0` of series `k` equals `y1` of series `k - 1`. Unset or
/// non-numeric values contribute zero without breaking the chain. Output
/// points keep the input row order.
#[must_use]
pub fn build_stack(rows: &[Record], series_keys: &[String]) -> Vec<Layer> {
    let mut layers: Vec<Layer> = series_keys
        .iter()
        .enumerate()
        .map(|(index, key)| Layer {
            key: key.clone(),
            index,
            points: Vec::with_capacity(rows.len()),
        })
        .collect();

    for (row, record) in rows.iter().enumerate() {
        let mut cumulative = 0.0;
        for layer in &mut layers {
            let value = record
                .get(&layer.key)
                .and_then(|value| value.as_f64())
                .unwrap_or(0.0);
            let y0 = cumulative;
            cumulative += value;
            layer.points.push(StackPoint {
                y0,
                y1: cumulative,
                row,
            });
        }
    }

    layers
}

/// Upper bound of the value domain: the largest `y1` across all layers.
///
/// Returns `0.0` for no layers or rows.
#[must_use]
pub fn stack_domain_max(layers: &[Layer]) -> f64 {
    layers
        .iter()
        .flat_map(|layer| layer.points.iter().map(|point| point.y1))
        .fold(0.0, f64::max)
}

/// Lower bound of the value domain; below zero only when negative values are stacked.
#[must_use]
pub fn stack_domain_min(layers: &[Layer]) -> f64 {
    layers
        .iter()
        .flat_map(|layer| {
            layer
                .points
                .iter()
                .flat_map(|point| [point.y0, point.y1])
        })
        .fold(0.0, f64::min)
}
