use serde::{Deserialize, Serialize};

use crate::core::data_type::{DataType, FieldAccessor};
use crate::core::record::Record;
use crate::core::ticks::{linear_ticks, nice_domain, time_ticks};
use crate::error::{ChartError, ChartResult};

/// Continuous scale family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Plain numbers.
    #[default]
    Linear,
    /// Epoch-millisecond timestamps; ticks follow calendar intervals.
    Time,
}

impl From<DataType> for ScaleKind {
    fn from(value: DataType) -> Self {
        match value {
            DataType::Number => Self::Linear,
            DataType::Date => Self::Time,
        }
    }
}

/// Affine domain → pixel mapping for numbers or times.
///
/// A scale is immutable once built; `nice` returns a new scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScale {
    kind: ScaleKind,
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl ContinuousScale {
    pub fn new(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            kind,
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    /// Fits a scale to the `[min, max]` extent of `accessor` over `rows`.
    pub fn from_extent(
        kind: ScaleKind,
        rows: &[Record],
        accessor: &FieldAccessor,
        range: (f64, f64),
    ) -> ChartResult<Self> {
        let domain = extent(rows, |record| accessor.value(record))?;
        Self::new(kind, domain, range)
    }

    #[must_use]
    pub fn kind(self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to a pixel. A degenerate domain maps to the range midpoint.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel back to a domain value. A degenerate range inverts to the domain midpoint.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (pixel - self.range_start) / span
        };
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Tick values inside the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        match self.kind {
            ScaleKind::Linear => linear_ticks(self.domain_start, self.domain_end, count),
            ScaleKind::Time => time_ticks(self.domain_start, self.domain_end, count),
        }
    }

    /// Rounds the domain outward to tick-aligned bounds.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (domain_start, domain_end) = nice_domain(self.domain_start, self.domain_end, count);
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }

    #[must_use]
    pub fn with_domain(self, domain_start: f64, domain_end: f64) -> Self {
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }
}

/// `[min, max]` of `value` over the rows that yield one.
///
/// Fails with [`ChartError::EmptyDataset`] when no row yields a value.
pub fn extent<F>(rows: &[Record], value: F) -> ChartResult<(f64, f64)>
where
    F: Fn(&Record) -> Option<f64>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in rows.iter().filter_map(value) {
        min = min.min(v);
        max = max.max(v);
    }

    if min > max {
        return Err(ChartError::EmptyDataset);
    }
    Ok((min, max))
}
