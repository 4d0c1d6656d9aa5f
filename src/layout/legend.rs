use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorScale, Margin, PixelPoint, Viewport};
use crate::layout::margin::{LegendAlign, LegendFootprint, LegendMeasure, LegendPosition, Side};

fn default_swatch_radius() -> f64 {
    5.0
}

fn default_label_gap() -> f64 {
    12.0
}

fn default_row_spacing() -> f64 {
    22.0
}

fn default_char_width() -> f64 {
    7.0
}

/// Text-metric assumptions used to size the legend without a font engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendStyle {
    #[serde(default = "default_swatch_radius")]
    pub swatch_radius: f64,
    #[serde(default = "default_label_gap")]
    pub label_gap: f64,
    #[serde(default = "default_row_spacing")]
    pub row_spacing: f64,
    #[serde(default = "default_char_width")]
    pub char_width: f64,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            swatch_radius: default_swatch_radius(),
            label_gap: default_label_gap(),
            row_spacing: default_row_spacing(),
            char_width: default_char_width(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub key: String,
    pub color: Color,
}

/// Positioned legend row, in plot-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRow {
    pub key: String,
    pub color: Color,
    pub swatch_center: PixelPoint,
    pub swatch_radius: f64,
    /// Start of the label text, vertically centered on the swatch.
    pub label_anchor: PixelPoint,
}

/// Vertical swatch-and-label list, one row per series key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    position: LegendPosition,
    entries: Vec<LegendEntry>,
    style: LegendStyle,
}

impl LegendLayout {
    #[must_use]
    pub fn new(position: LegendPosition, entries: Vec<LegendEntry>) -> Self {
        Self {
            position,
            entries,
            style: LegendStyle::default(),
        }
    }

    /// One entry per key, colored in key order.
    #[must_use]
    pub fn from_keys(position: LegendPosition, keys: &[String], colors: &mut ColorScale) -> Self {
        let entries = keys
            .iter()
            .map(|key| LegendEntry {
                key: key.clone(),
                color: colors.color(key),
            })
            .collect();
        Self::new(position, entries)
    }

    #[must_use]
    pub fn with_style(mut self, style: LegendStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn position(&self) -> LegendPosition {
        self.position
    }

    #[must_use]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    #[must_use]
    pub fn style(&self) -> LegendStyle {
        self.style
    }

    /// Bounding box of the whole list.
    ///
    /// Only the entry count and the longest label matter, so entry order never
    /// changes the result.
    #[must_use]
    pub fn footprint(&self) -> LegendFootprint {
        if self.entries.is_empty() {
            return LegendFootprint::ZERO;
        }
        let longest = self
            .entries
            .iter()
            .map(|entry| entry.key.chars().count())
            .max()
            .unwrap_or(0);
        LegendFootprint {
            width: self.style.swatch_radius * 2.0
                + self.style.label_gap
                + longest as f64 * self.style.char_width,
            height: self.entries.len() as f64 * self.style.row_spacing,
        }
    }

    /// Plot-local top-left corner of the legend box under a committed margin.
    ///
    /// The box sits against the outer container edge of its side and is aligned
    /// along that side per the position's first word.
    #[must_use]
    pub fn origin(&self, viewport: Viewport, margin: Margin) -> PixelPoint {
        let plot = margin.plot_area(viewport);
        let footprint = self.footprint();
        let along = |extent: f64, size: f64| match self.position.align() {
            LegendAlign::Start => 0.0,
            LegendAlign::Center => (extent - size) / 2.0,
            LegendAlign::End => extent - size,
        };

        match self.position.side() {
            Side::Top => PixelPoint::new(along(plot.width, footprint.width), -margin.top),
            Side::Bottom => PixelPoint::new(
                along(plot.width, footprint.width),
                plot.height + margin.bottom - footprint.height,
            ),
            Side::Left => PixelPoint::new(-margin.left, along(plot.height, footprint.height)),
            Side::Right => PixelPoint::new(
                plot.width + margin.right - footprint.width,
                along(plot.height, footprint.height),
            ),
        }
    }

    /// Entry rows laid out from `origin` downwards.
    #[must_use]
    pub fn rows(&self, origin: PixelPoint) -> Vec<LegendRow> {
        let radius = self.style.swatch_radius;
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let center_y = origin.y + (index as f64 + 0.5) * self.style.row_spacing;
                LegendRow {
                    key: entry.key.clone(),
                    color: entry.color,
                    swatch_center: PixelPoint::new(origin.x + radius, center_y),
                    swatch_radius: radius,
                    label_anchor: PixelPoint::new(
                        origin.x + radius * 2.0 + self.style.label_gap,
                        center_y,
                    ),
                }
            })
            .collect()
    }
}

impl LegendMeasure for LegendLayout {
    fn measure(&self, _margin: Margin) -> LegendFootprint {
        self.footprint()
    }
}
