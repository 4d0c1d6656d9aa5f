use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{BandScale, ContinuousScale, DataType, Margin, PixelPoint, PlotArea, Viewport};
use crate::layout::label_format::{
    AxisLabelLocale, MAX_CATEGORY_LABEL_CHARS, format_category, format_tick, truncate_label,
};
use crate::layout::margin::{AXIS_INSET, AXIS_LABEL_INSET, Side, XAxisPosition, YAxisPosition};

/// Assumed glyph advance for band-axis labels, in pixels.
const CATEGORY_GLYPH_WIDTH: f64 = 7.0;
/// Per-character width used to detect band-label overflow.
const CATEGORY_OVERFLOW_CHAR_WIDTH: f64 = 8.0;
/// Largest tick margin a rotated band axis may request.
const MAX_TICK_MARGIN: f64 = 40.0;

const TOP_TICK_OFFSET: f64 = 8.0;
const BOTTOM_TICK_OFFSET: f64 = 18.0;
const SIDE_TICK_OFFSET: f64 = 12.0;

/// Horizontal alignment of a text run relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Vertical alignment of a text run relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Auto,
    Middle,
}

/// Straight segment in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: PixelPoint,
    pub end: PixelPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Domain value (epoch ms for dates); `None` on band axes.
    pub value: Option<f64>,
    pub label: String,
    /// Pixel position along the axis.
    pub offset: f64,
    pub label_anchor: PixelPoint,
    pub text_anchor: TextAnchor,
    pub baseline: TextBaseline,
    /// Rotation in degrees applied around `label_anchor`.
    pub rotate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub text: String,
    pub position: PixelPoint,
    pub rotate: f64,
}

/// Everything a renderer needs to draw one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisGeometry {
    pub side: Side,
    pub anchor: PixelPoint,
    pub line: Segment,
    pub ticks: Vec<AxisTick>,
    pub grid_lines: Vec<Segment>,
    /// Extra bottom inset requested by rotated band labels.
    pub tick_margin: f64,
}

/// Plot-local origin of the x axis line.
#[must_use]
pub fn x_axis_anchor(position: XAxisPosition, viewport: Viewport, margin: Margin) -> PixelPoint {
    match position {
        XAxisPosition::Top => PixelPoint::new(0.0, 0.0),
        XAxisPosition::Bottom => PixelPoint::new(0.0, margin.plot_area(viewport).height),
    }
}

/// Plot-local origin of the y axis line.
#[must_use]
pub fn y_axis_anchor(position: YAxisPosition, viewport: Viewport, margin: Margin) -> PixelPoint {
    match position {
        YAxisPosition::Left => PixelPoint::new(0.0, 0.0),
        YAxisPosition::Right => PixelPoint::new(margin.plot_area(viewport).width, 0.0),
    }
}

/// Axis line spanning the plot along `side`.
#[must_use]
pub fn axis_line(side: Side, anchor: PixelPoint, plot: PlotArea) -> Segment {
    match side {
        Side::Top | Side::Bottom => Segment {
            start: PixelPoint::new(0.0, anchor.y),
            end: PixelPoint::new(plot.width, anchor.y),
        },
        Side::Left | Side::Right => Segment {
            start: PixelPoint::new(anchor.x, 0.0),
            end: PixelPoint::new(anchor.x, plot.height),
        },
    }
}

/// Target tick count for horizontal axes, bucketed on container width.
#[must_use]
pub fn horizontal_tick_count(container_width: f64) -> usize {
    let bucket = if container_width < 480.0 {
        100.0
    } else if container_width < 769.0 {
        120.0
    } else if container_width < 1024.0 {
        140.0
    } else {
        160.0
    };
    tick_count(container_width / bucket)
}

/// Target tick count for vertical axes: one per 100 px of container height.
#[must_use]
pub fn vertical_tick_count(container_height: f64) -> usize {
    tick_count(container_height / 100.0)
}

fn tick_count(raw: f64) -> usize {
    if raw.is_finite() { (raw.floor() as usize).max(1) } else { 1 }
}

/// Brackets `ticks` with the domain extrema, skipping duplicates.
#[must_use]
pub fn with_boundary_ticks(ticks: &[f64], domain: (f64, f64)) -> Vec<f64> {
    let mut values = Vec::with_capacity(ticks.len() + 2);
    values.push(domain.0);
    for &tick in ticks {
        if values.last() != Some(&tick) {
            values.push(tick);
        }
    }
    if values.last() != Some(&domain.1) {
        values.push(domain.1);
    }
    values
}

/// Tick label anchor and alignment for a tick `offset` pixels along the axis.
#[must_use]
pub fn tick_label_anchor(
    side: Side,
    anchor: PixelPoint,
    offset: f64,
) -> (PixelPoint, TextAnchor, TextBaseline) {
    match side {
        Side::Top => (
            PixelPoint::new(offset, anchor.y - TOP_TICK_OFFSET),
            TextAnchor::Middle,
            TextBaseline::Auto,
        ),
        Side::Bottom => (
            PixelPoint::new(offset, anchor.y + BOTTOM_TICK_OFFSET),
            TextAnchor::Middle,
            TextBaseline::Auto,
        ),
        Side::Left => (
            PixelPoint::new(anchor.x - SIDE_TICK_OFFSET, offset),
            TextAnchor::End,
            TextBaseline::Middle,
        ),
        Side::Right => (
            PixelPoint::new(anchor.x + SIDE_TICK_OFFSET, offset),
            TextAnchor::Start,
            TextBaseline::Middle,
        ),
    }
}

/// Places an axis title.
///
/// Titles are centered along the plot. Without an axis line the title moves
/// in to where the tick labels would have been.
#[must_use]
pub fn axis_title(
    text: impl Into<String>,
    side: Side,
    has_axis_line: bool,
    anchor: PixelPoint,
    plot: PlotArea,
) -> AxisTitle {
    let (position, rotate) = title_position(side, has_axis_line, anchor, plot);
    AxisTitle {
        text: text.into(),
        position,
        rotate,
    }
}

fn title_position(
    side: Side,
    has_axis_line: bool,
    anchor: PixelPoint,
    plot: PlotArea,
) -> (PixelPoint, f64) {
    let half_label = AXIS_LABEL_INSET / 2.0;
    match side {
        Side::Top => (
            PixelPoint::new(plot.width / 2.0, anchor.y - half_label - AXIS_INSET),
            0.0,
        ),
        Side::Bottom => {
            let y = if has_axis_line {
                anchor.y + half_label + AXIS_INSET
            } else {
                anchor.y + AXIS_LABEL_INSET
            };
            (PixelPoint::new(plot.width / 2.0, y), 0.0)
        }
        Side::Left => {
            let x = if has_axis_line {
                -half_label - AXIS_INSET
            } else {
                -AXIS_LABEL_INSET
            };
            (PixelPoint::new(x, plot.height / 2.0), -90.0)
        }
        Side::Right => (
            PixelPoint::new(anchor.x + half_label + AXIS_INSET, plot.height / 2.0),
            90.0,
        ),
    }
}

/// Options for a continuous (linear or time) axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousAxisOptions {
    pub side: Side,
    pub data_type: DataType,
    pub locale: AxisLabelLocale,
    pub tick_count: usize,
    /// Prepend/append the domain extrema to the generated ticks.
    pub include_extrema: bool,
    pub grid: bool,
}

/// Builds a continuous axis. `anchor` comes from [`x_axis_anchor`] or [`y_axis_anchor`].
#[must_use]
pub fn continuous_axis(
    scale: &ContinuousScale,
    options: ContinuousAxisOptions,
    anchor: PixelPoint,
    plot: PlotArea,
) -> AxisGeometry {
    let generated = scale.ticks(options.tick_count);
    let values = if options.include_extrema {
        with_boundary_ticks(&generated, scale.domain())
    } else {
        generated
    };

    let ticks: Vec<AxisTick> = values
        .iter()
        .map(|&value| {
            let offset = scale.map(value);
            let (label_anchor, text_anchor, baseline) =
                tick_label_anchor(options.side, anchor, offset);
            AxisTick {
                value: Some(value),
                label: format_tick(value, options.data_type, options.locale),
                offset,
                label_anchor,
                text_anchor,
                baseline,
                rotate: 0.0,
            }
        })
        .collect();

    let grid_lines = if options.grid {
        grid_lines(options.side, ticks.iter().map(|tick| tick.offset), plot)
    } else {
        Vec::new()
    };
    trace!(side = ?options.side, ticks = ticks.len(), "built continuous axis");

    AxisGeometry {
        side: options.side,
        anchor,
        line: axis_line(options.side, anchor, plot),
        ticks,
        grid_lines,
        tick_margin: 0.0,
    }
}

/// Builds a band axis with one tick per category at the band center.
///
/// When any label is wider than a band, labels on horizontal axes are cut to
/// ten characters, rotated a quarter turn and a tick margin is reported for
/// the caller to add to the bottom inset.
#[must_use]
pub fn band_axis(
    scale: &BandScale,
    side: Side,
    locale: AxisLabelLocale,
    anchor: PixelPoint,
    plot: PlotArea,
) -> AxisGeometry {
    let labels: Vec<String> = scale
        .domain()
        .iter()
        .map(|category| format_category(category, locale))
        .collect();
    let bandwidth = scale.bandwidth();
    let horizontal = matches!(side, Side::Top | Side::Bottom);
    let crowded = horizontal
        && labels
            .iter()
            .any(|label| label.chars().count() as f64 * CATEGORY_OVERFLOW_CHAR_WIDTH > bandwidth);

    let longest = labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);
    let tick_margin = if !crowded {
        0.0
    } else if longest < MAX_CATEGORY_LABEL_CHARS {
        longest as f64 * CATEGORY_GLYPH_WIDTH / 2.0
    } else {
        MAX_TICK_MARGIN
    };

    let ticks = labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| {
            let offset = scale.center(index);
            if !crowded {
                let (label_anchor, text_anchor, baseline) = band_label_anchor(side, anchor, offset);
                return AxisTick {
                    value: None,
                    label,
                    offset,
                    label_anchor,
                    text_anchor,
                    baseline,
                    rotate: 0.0,
                };
            }

            let label = truncate_label(&label, MAX_CATEGORY_LABEL_CHARS);
            let (label_anchor, rotate) = match side {
                Side::Bottom => (
                    PixelPoint::new(
                        offset + CATEGORY_GLYPH_WIDTH / 2.0,
                        anchor.y + label.chars().count() as f64 / 2.0 * CATEGORY_GLYPH_WIDTH,
                    ),
                    -90.0,
                ),
                // Top-side labels keep their position; only the text is cut.
                _ => (PixelPoint::new(offset, anchor.y - CATEGORY_GLYPH_WIDTH), 0.0),
            };
            AxisTick {
                value: None,
                label,
                offset,
                label_anchor,
                text_anchor: TextAnchor::Middle,
                baseline: TextBaseline::Auto,
                rotate,
            }
        })
        .collect();

    AxisGeometry {
        side,
        anchor,
        line: axis_line(side, anchor, plot),
        ticks,
        grid_lines: Vec::new(),
        tick_margin,
    }
}

fn band_label_anchor(
    side: Side,
    anchor: PixelPoint,
    offset: f64,
) -> (PixelPoint, TextAnchor, TextBaseline) {
    match side {
        Side::Top => (
            PixelPoint::new(offset, anchor.y - CATEGORY_GLYPH_WIDTH),
            TextAnchor::Middle,
            TextBaseline::Auto,
        ),
        Side::Bottom => (
            PixelPoint::new(offset, anchor.y + CATEGORY_GLYPH_WIDTH * 2.0),
            TextAnchor::Middle,
            TextBaseline::Auto,
        ),
        Side::Left | Side::Right => tick_label_anchor(side, anchor, offset),
    }
}

/// Grid lines across the plot at each tick offset.
///
/// Horizontal axes yield vertical lines; vertical axes yield horizontal lines.
#[must_use]
pub fn grid_lines(side: Side, offsets: impl Iterator<Item = f64>, plot: PlotArea) -> Vec<Segment> {
    offsets
        .map(|offset| match side {
            Side::Top | Side::Bottom => Segment {
                start: PixelPoint::new(offset, 0.0),
                end: PixelPoint::new(offset, plot.height),
            },
            Side::Left | Side::Right => Segment {
                start: PixelPoint::new(0.0, offset),
                end: PixelPoint::new(plot.width, offset),
            },
        })
        .collect()
}
