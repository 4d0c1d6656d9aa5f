use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{BandScale, ContinuousScale, PixelPoint};
use crate::interaction::HitTarget;

/// Per-row value of one series in the value domain.
///
/// For stacked charts the values are the cumulative tops (`y1`); for plain
/// line charts the raw values. `key` is `None` for an ungrouped chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColumn {
    pub key: Option<String>,
    pub values: Vec<Option<f64>>,
}

impl SeriesColumn {
    #[must_use]
    pub fn new(key: Option<String>, values: Vec<Option<f64>>) -> Self {
        Self { key, values }
    }
}

/// Picks the column whose value at `row` is closest to `hovered_y`.
///
/// Missing and non-finite values are skipped; the earlier column wins ties.
fn nearest_column(columns: &[SeriesColumn], row: usize, hovered_y: f64) -> Option<(usize, f64)> {
    let candidates: SmallVec<[(OrderedFloat<f64>, usize, f64); 8]> = columns
        .iter()
        .enumerate()
        .filter_map(|(index, column)| {
            let value = column.values.get(row).copied().flatten()?;
            value
                .is_finite()
                .then(|| (OrderedFloat((value - hovered_y).abs()), index, value))
        })
        .collect();

    candidates
        .into_iter()
        .min_by_key(|(distance, index, _)| (*distance, *index))
        .map(|(_, index, value)| (index, value))
}

fn target_at_row(
    columns: &[SeriesColumn],
    y_scale: &ContinuousScale,
    row: usize,
    anchor_x: f64,
    cursor: PixelPoint,
) -> HitTarget {
    let hovered_y = y_scale.invert(cursor.y);
    match nearest_column(columns, row, hovered_y) {
        Some((column, value)) => HitTarget {
            row,
            series_key: columns[column].key.clone(),
            anchor: PixelPoint::new(anchor_x, y_scale.map(value)),
        },
        None => HitTarget {
            row,
            series_key: None,
            anchor: PixelPoint::new(anchor_x, cursor.y),
        },
    }
}

/// Nearest-row lookup along a continuous x axis (line and area charts).
#[derive(Debug, Clone, PartialEq)]
pub struct NearestXIndex {
    x_scale: ContinuousScale,
    y_scale: ContinuousScale,
    /// Domain x per row; `None` for rows without a usable x.
    xs: Vec<Option<f64>>,
    columns: Vec<SeriesColumn>,
}

impl NearestXIndex {
    #[must_use]
    pub fn new(
        x_scale: ContinuousScale,
        y_scale: ContinuousScale,
        xs: Vec<Option<f64>>,
        columns: Vec<SeriesColumn>,
    ) -> Self {
        Self {
            x_scale,
            y_scale,
            xs,
            columns,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[SeriesColumn] {
        &self.columns
    }

    /// Row whose x is closest to `hovered_x` (domain units).
    ///
    /// Linear scan; the first row wins ties.
    #[must_use]
    pub fn nearest_row(&self, hovered_x: f64) -> Option<usize> {
        let mut best: Option<(OrderedFloat<f64>, usize)> = None;
        for (row, x) in self.xs.iter().enumerate() {
            let Some(x) = x.filter(|x| x.is_finite()) else {
                continue;
            };
            let distance = OrderedFloat((x - hovered_x).abs());
            match best {
                Some((current, _)) if current <= distance => {}
                _ => best = Some((distance, row)),
            }
        }
        best.map(|(_, row)| row)
    }

    #[must_use]
    pub fn locate(&self, cursor: PixelPoint) -> Option<HitTarget> {
        let hovered_x = self.x_scale.invert(cursor.x);
        let row = self.nearest_row(hovered_x)?;
        let x = self.xs[row]?;
        Some(target_at_row(
            &self.columns,
            &self.y_scale,
            row,
            self.x_scale.map(x),
            cursor,
        ))
    }
}

/// Band lookup for bar charts: the band under the cursor selects the row.
#[derive(Debug, Clone, PartialEq)]
pub struct BandIndex {
    band: BandScale,
    /// Row index backing each band, in band order.
    band_rows: Vec<usize>,
    y_scale: ContinuousScale,
    columns: Vec<SeriesColumn>,
}

impl BandIndex {
    #[must_use]
    pub fn new(
        band: BandScale,
        band_rows: Vec<usize>,
        y_scale: ContinuousScale,
        columns: Vec<SeriesColumn>,
    ) -> Self {
        Self {
            band,
            band_rows,
            y_scale,
            columns,
        }
    }

    #[must_use]
    pub fn band(&self) -> &BandScale {
        &self.band
    }

    #[must_use]
    pub fn locate(&self, cursor: PixelPoint) -> Option<HitTarget> {
        let band = self.band.index_at(cursor.x)?;
        let row = *self.band_rows.get(band)?;
        Some(target_at_row(
            &self.columns,
            &self.y_scale,
            row,
            self.band.center(band),
            cursor,
        ))
    }
}
