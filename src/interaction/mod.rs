pub mod nearest;
pub mod pie;
pub mod voronoi;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Margin, PixelPoint, Record, Viewport};

pub use nearest::{BandIndex, NearestXIndex, SeriesColumn};
pub use pie::PieIndex;
pub use voronoi::{VoronoiCell, VoronoiIndex, VoronoiSeed};

/// Distance from the tooltip anchor to each container edge, in pixels.
///
/// Renderers use it to flip the tooltip away from the nearest edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDistances {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl EdgeDistances {
    /// Measures a plot-local `anchor` against the container.
    #[must_use]
    pub fn from_anchor(anchor: PixelPoint, viewport: Viewport, margin: Margin) -> Self {
        let x = anchor.x + margin.left;
        let y = anchor.y + margin.top;
        Self {
            left: x,
            right: viewport.width_px() - x,
            top: y,
            bottom: viewport.height_px() - y,
        }
    }
}

/// Row and anchor chosen by a hit strategy, before the record is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct HitTarget {
    pub row: usize,
    pub series_key: Option<String>,
    pub anchor: PixelPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipHit {
    pub row: usize,
    pub record: Record,
    pub series_key: Option<String>,
    /// Plot-local pixel position the tooltip points at.
    pub anchor: PixelPoint,
    pub edges: EdgeDistances,
}

/// Tooltip state handed back to the caller after every pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible(TooltipHit),
}

impl TooltipState {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }

    #[must_use]
    pub fn hit(&self) -> Option<&TooltipHit> {
        match self {
            Self::Hidden => None,
            Self::Visible(hit) => Some(hit),
        }
    }
}

/// Pointer-leave always hides the tooltip.
#[must_use]
pub fn on_pointer_leave() -> TooltipState {
    TooltipState::Hidden
}

/// Hit-testing strategy, selected by chart kind.
#[derive(Debug, Clone, PartialEq)]
pub enum HitStrategy {
    /// Line and area charts.
    NearestX(NearestXIndex),
    /// Bar charts.
    Band(BandIndex),
    /// Scatter plots.
    Voronoi(VoronoiIndex),
    Pie(PieIndex),
}

impl HitStrategy {
    fn locate(&self, cursor: PixelPoint) -> Option<HitTarget> {
        match self {
            Self::NearestX(index) => index.locate(cursor),
            Self::Band(index) => index.locate(cursor),
            Self::Voronoi(index) => index.locate(cursor),
            Self::Pie(index) => index.locate(cursor),
        }
    }
}

/// Resolves pointer positions to tooltip states for one laid-out chart.
///
/// Cursor positions are plot-local: `(0, 0)` is the top-left corner of the
/// plot area, inside the margin.
#[derive(Debug, Clone, PartialEq)]
pub struct HitTester {
    strategy: HitStrategy,
    rows: Vec<Record>,
    viewport: Viewport,
    margin: Margin,
}

impl HitTester {
    #[must_use]
    pub fn new(strategy: HitStrategy, rows: Vec<Record>, viewport: Viewport, margin: Margin) -> Self {
        Self {
            strategy,
            rows,
            viewport,
            margin,
        }
    }

    #[must_use]
    pub fn strategy(&self) -> &HitStrategy {
        &self.strategy
    }

    /// Rows hit results index into.
    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    #[must_use]
    pub fn hit_test(&self, cursor: PixelPoint) -> TooltipState {
        if !cursor.x.is_finite() || !cursor.y.is_finite() {
            return TooltipState::Hidden;
        }
        let Some(target) = self.strategy.locate(cursor) else {
            trace!(x = cursor.x, y = cursor.y, "hit test missed");
            return TooltipState::Hidden;
        };
        let Some(record) = self.rows.get(target.row) else {
            return TooltipState::Hidden;
        };
        trace!(
            x = cursor.x,
            y = cursor.y,
            row = target.row,
            series = ?target.series_key,
            "hit test resolved"
        );

        TooltipState::Visible(TooltipHit {
            row: target.row,
            record: record.clone(),
            series_key: target.series_key,
            anchor: target.anchor,
            edges: EdgeDistances::from_anchor(target.anchor, self.viewport, self.margin),
        })
    }

    #[must_use]
    pub fn on_pointer_leave(&self) -> TooltipState {
        on_pointer_leave()
    }
}
