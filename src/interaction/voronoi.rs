use ordered_float::OrderedFloat;
#[cfg(feature = "parallel-voronoi")]
use rayon::prelude::*;
use tracing::debug;

use crate::core::{PixelPoint, PlotArea};
use crate::interaction::HitTarget;

/// Relative slack for edge tests so shared boundaries count as inside.
const CONTAINMENT_EPSILON: f64 = 1e-9;

/// Padding of cell bounding boxes, relative to the larger plot side.
const BOUNDS_SLACK: f64 = 1e-6;

/// Upper bound on lookup buckets per grid side.
const MAX_GRID_SIDE: usize = 64;

/// One point to tessellate around.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiSeed {
    pub row: usize,
    pub series_key: Option<String>,
    pub position: PixelPoint,
}

/// Convex region of the plot closer to `seed` than to any other seed.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    pub seed: VoronoiSeed,
    /// Vertices in drawing order; empty when the cell vanished under clipping.
    pub polygon: Vec<PixelPoint>,
}

impl VoronoiCell {
    /// Point-in-convex-polygon test, boundary inclusive.
    #[must_use]
    pub fn contains(&self, point: PixelPoint) -> bool {
        if self.polygon.len() < 3 {
            return false;
        }
        let n = self.polygon.len();
        (0..n).all(|i| {
            let a = self.polygon[i];
            let b = self.polygon[(i + 1) % n];
            let edge = PixelPoint::new(b.x - a.x, b.y - a.y);
            let cross = edge.x * (point.y - a.y) - edge.y * (point.x - a.x);
            let scale = edge.x.abs() + edge.y.abs();
            cross >= -CONTAINMENT_EPSILON * scale.max(1.0) * scale.max(1.0)
        })
    }
}

/// Voronoi tessellation of the plot rectangle.
///
/// Each cell is the plot rectangle clipped by the perpendicular-bisector
/// half-plane against every other seed. Seeds sharing a position keep only
/// the first cell; non-finite seeds are dropped. Lookups only test the cells
/// whose bounding box overlaps the cursor's grid bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiIndex {
    plot: PlotArea,
    cells: Vec<VoronoiCell>,
    grid: CellGrid,
}

impl VoronoiIndex {
    #[must_use]
    pub fn build(seeds: Vec<VoronoiSeed>, plot: PlotArea) -> Self {
        let mut unique: Vec<VoronoiSeed> = Vec::with_capacity(seeds.len());
        for seed in seeds {
            if !seed.position.x.is_finite() || !seed.position.y.is_finite() {
                continue;
            }
            if unique.iter().any(|kept| kept.position == seed.position) {
                continue;
            }
            unique.push(seed);
        }

        let positions: Vec<PixelPoint> = unique.iter().map(|seed| seed.position).collect();
        let polygons = build_polygons(&positions, plot);
        let cells: Vec<VoronoiCell> = unique
            .into_iter()
            .zip(polygons)
            .map(|(seed, polygon)| VoronoiCell { seed, polygon })
            .collect();
        let grid = CellGrid::build(&cells, plot);
        debug!(
            cells = cells.len(),
            buckets = grid.buckets.len(),
            "built voronoi tessellation"
        );

        Self { plot, cells, grid }
    }

    #[must_use]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// Cell containing `cursor`; the first containing cell wins on shared edges.
    #[must_use]
    pub fn find(&self, cursor: PixelPoint) -> Option<&VoronoiCell> {
        if !self.plot.contains(cursor.x, cursor.y) {
            return None;
        }
        self.grid
            .candidates(cursor)
            .iter()
            .map(|&index| &self.cells[index])
            .find(|cell| cell.contains(cursor))
            .or_else(|| {
                // Rounding can leave hairline gaps between cells.
                self.cells
                    .iter()
                    .min_by_key(|cell| OrderedFloat(cell.seed.position.distance_squared(cursor)))
            })
    }

    #[must_use]
    pub fn locate(&self, cursor: PixelPoint) -> Option<HitTarget> {
        self.find(cursor).map(|cell| HitTarget {
            row: cell.seed.row,
            series_key: cell.seed.series_key.clone(),
            anchor: cell.seed.position,
        })
    }
}

/// Uniform bucket grid over the plot. Each bucket lists, in cell order, the
/// cells whose padded bounding box overlaps it.
#[derive(Debug, Clone, PartialEq)]
struct CellGrid {
    side: usize,
    width: f64,
    height: f64,
    buckets: Vec<Vec<usize>>,
}

impl CellGrid {
    fn build(cells: &[VoronoiCell], plot: PlotArea) -> Self {
        let side = ((cells.len() as f64).sqrt().ceil() as usize).clamp(1, MAX_GRID_SIDE);
        let mut grid = Self {
            side,
            width: plot.width,
            height: plot.height,
            buckets: vec![Vec::new(); side * side],
        };
        let slack = BOUNDS_SLACK * plot.width.max(plot.height).max(1.0);

        for (index, cell) in cells.iter().enumerate() {
            let Some((min, max)) = bounding_box(&cell.polygon) else {
                continue;
            };
            let columns = grid.column_of(min.x - slack)..=grid.column_of(max.x + slack);
            for row in grid.row_of(min.y - slack)..=grid.row_of(max.y + slack) {
                for column in columns.clone() {
                    grid.buckets[row * side + column].push(index);
                }
            }
        }
        grid
    }

    fn candidates(&self, point: PixelPoint) -> &[usize] {
        &self.buckets[self.row_of(point.y) * self.side + self.column_of(point.x)]
    }

    fn column_of(&self, x: f64) -> usize {
        bucket_of(x, self.width, self.side)
    }

    fn row_of(&self, y: f64) -> usize {
        bucket_of(y, self.height, self.side)
    }
}

fn bucket_of(value: f64, extent: f64, count: usize) -> usize {
    if extent <= 0.0 || !extent.is_finite() || !value.is_finite() {
        return 0;
    }
    let scaled = (value / extent * count as f64).floor();
    if scaled <= 0.0 {
        0
    } else {
        (scaled as usize).min(count - 1)
    }
}

fn bounding_box(polygon: &[PixelPoint]) -> Option<(PixelPoint, PixelPoint)> {
    if polygon.len() < 3 {
        return None;
    }
    let mut min = polygon[0];
    let mut max = polygon[0];
    for point in &polygon[1..] {
        min = PixelPoint::new(min.x.min(point.x), min.y.min(point.y));
        max = PixelPoint::new(max.x.max(point.x), max.y.max(point.y));
    }
    Some((min, max))
}

#[cfg(not(feature = "parallel-voronoi"))]
fn build_polygons(positions: &[PixelPoint], plot: PlotArea) -> Vec<Vec<PixelPoint>> {
    (0..positions.len())
        .map(|index| cell_polygon(positions, index, plot))
        .collect()
}

#[cfg(feature = "parallel-voronoi")]
fn build_polygons(positions: &[PixelPoint], plot: PlotArea) -> Vec<Vec<PixelPoint>> {
    (0..positions.len())
        .into_par_iter()
        .map(|index| cell_polygon(positions, index, plot))
        .collect()
}

fn cell_polygon(positions: &[PixelPoint], index: usize, plot: PlotArea) -> Vec<PixelPoint> {
    let seed = positions[index];
    let mut polygon = vec![
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(plot.width, 0.0),
        PixelPoint::new(plot.width, plot.height),
        PixelPoint::new(0.0, plot.height),
    ];

    for (other_index, &other) in positions.iter().enumerate() {
        if other_index == index {
            continue;
        }
        // Keep p where |p - seed|² <= |p - other|², i.e. p·n <= c.
        let normal = PixelPoint::new(other.x - seed.x, other.y - seed.y);
        let offset = (other.x * other.x + other.y * other.y - seed.x * seed.x - seed.y * seed.y)
            / 2.0;
        polygon = clip_half_plane(&polygon, normal, offset);
        if polygon.is_empty() {
            break;
        }
    }
    polygon
}

/// Sutherland-Hodgman clip of a convex polygon against `p·normal <= offset`.
fn clip_half_plane(polygon: &[PixelPoint], normal: PixelPoint, offset: f64) -> Vec<PixelPoint> {
    let side = |p: PixelPoint| p.x * normal.x + p.y * normal.y - offset;
    let mut clipped = Vec::with_capacity(polygon.len() + 1);

    for (i, &current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        let current_side = side(current);
        let next_side = side(next);

        if current_side <= 0.0 {
            clipped.push(current);
        }
        if (current_side <= 0.0) != (next_side <= 0.0) {
            let t = current_side / (current_side - next_side);
            clipped.push(PixelPoint::new(
                current.x + t * (next.x - current.x),
                current.y + t * (next.y - current.y),
            ));
        }
    }
    clipped
}
