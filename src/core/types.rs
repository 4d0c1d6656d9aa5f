use serde::{Deserialize, Serialize};

/// Container size in pixels, supplied by the host's responsive-sizing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }
}

/// Four-sided pixel inset between the container edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Plot area left after subtracting the margin from the container.
    ///
    /// Hostile container sizes degenerate to a zero-sized plot instead of failing.
    #[must_use]
    pub fn plot_area(self, viewport: Viewport) -> PlotArea {
        PlotArea {
            width: (viewport.width_px() - self.left - self.right).max(0.0),
            height: (viewport.height_px() - self.top - self.bottom).max(0.0),
        }
    }

    /// Returns `true` when the margin leaves a non-empty plot area.
    #[must_use]
    pub fn is_usable(self, viewport: Viewport) -> bool {
        self.left + self.right < viewport.width_px() && self.top + self.bottom < viewport.height_px()
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

/// Plot-local drawing extent (origin at the margin's top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Point in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}
