use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Margin;

/// Axis-line clearance applied on every side.
pub const MIN_INSET: f64 = 20.0;
/// Extra inset on a side hosting an axis line and its tick labels.
pub const AXIS_INSET: f64 = 40.0;
/// Extra inset on a side hosting an axis title.
pub const AXIS_LABEL_INSET: f64 = 20.0;
/// Gap between the legend and the plot-side content of the margin.
pub const LEGEND_CLEARANCE: f64 = 6.0;

/// Placement of the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XAxisPosition {
    Top,
    #[default]
    Bottom,
}

/// Placement of the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxisPosition {
    #[default]
    Left,
    Right,
}

/// Container side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl From<XAxisPosition> for Side {
    fn from(value: XAxisPosition) -> Self {
        match value {
            XAxisPosition::Top => Self::Top,
            XAxisPosition::Bottom => Self::Bottom,
        }
    }
}

impl From<YAxisPosition> for Side {
    fn from(value: YAxisPosition) -> Self {
        match value {
            YAxisPosition::Left => Self::Left,
            YAxisPosition::Right => Self::Right,
        }
    }
}

/// Legend anchor tag.
///
/// In the two-word forms the last word names the side the legend occupies and
/// the first word its alignment along that side: `left-top` sits above the
/// plot aligned left, `top-left` sits left of the plot aligned to the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
}

/// Alignment of the legend box along the side it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendAlign {
    Start,
    Center,
    End,
}

impl LegendPosition {
    /// Margin side grown by the legend.
    #[must_use]
    pub fn side(self) -> Side {
        match self {
            Self::Top | Self::LeftTop | Self::RightTop => Side::Top,
            Self::Bottom | Self::LeftBottom | Self::RightBottom => Side::Bottom,
            Self::Left | Self::TopLeft | Self::BottomLeft => Side::Left,
            Self::Right | Self::TopRight | Self::BottomRight => Side::Right,
        }
    }

    #[must_use]
    pub fn align(self) -> LegendAlign {
        match self {
            Self::Top | Self::Bottom | Self::Left | Self::Right => LegendAlign::Center,
            Self::LeftTop | Self::LeftBottom | Self::TopLeft | Self::TopRight => {
                LegendAlign::Start
            }
            Self::RightTop | Self::RightBottom | Self::BottomLeft | Self::BottomRight => {
                LegendAlign::End
            }
        }
    }
}

/// Legend request: hidden, or shown at a position. `true` means [`LegendPosition::Right`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "LegendSetting", into = "LegendSetting")]
pub enum LegendRequest {
    #[default]
    Hidden,
    Shown(LegendPosition),
}

impl LegendRequest {
    #[must_use]
    pub fn position(self) -> Option<LegendPosition> {
        match self {
            Self::Hidden => None,
            Self::Shown(position) => Some(position),
        }
    }
}

impl From<bool> for LegendRequest {
    fn from(value: bool) -> Self {
        if value {
            Self::Shown(LegendPosition::Right)
        } else {
            Self::Hidden
        }
    }
}

impl From<LegendPosition> for LegendRequest {
    fn from(value: LegendPosition) -> Self {
        Self::Shown(value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum LegendSetting {
    Flag(bool),
    Position(LegendPosition),
}

impl From<LegendSetting> for LegendRequest {
    fn from(value: LegendSetting) -> Self {
        match value {
            LegendSetting::Flag(flag) => flag.into(),
            LegendSetting::Position(position) => position.into(),
        }
    }
}

impl From<LegendRequest> for LegendSetting {
    fn from(value: LegendRequest) -> Self {
        match value {
            LegendRequest::Hidden => Self::Flag(false),
            LegendRequest::Shown(position) => Self::Position(position),
        }
    }
}

/// Measured legend bounding box in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegendFootprint {
    pub width: f64,
    pub height: f64,
}

impl LegendFootprint {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}

/// Something that can report the legend footprint for a candidate margin.
pub trait LegendMeasure {
    fn measure(&self, margin: Margin) -> LegendFootprint;
}

impl<T: LegendMeasure> LegendMeasure for Option<T> {
    fn measure(&self, margin: Margin) -> LegendFootprint {
        self.as_ref()
            .map_or(LegendFootprint::ZERO, |legend| legend.measure(margin))
    }
}

/// Inset for the requested axes and axis titles, without a legend.
///
/// Axis and title increments are independent: a title on a hidden axis still
/// reserves room on that axis' default side (`bottom` for x, `left` for y).
#[must_use]
pub fn compute_base_margin(
    x_axis: Option<XAxisPosition>,
    y_axis: Option<YAxisPosition>,
    x_label_present: bool,
    y_label_present: bool,
) -> Margin {
    let mut margin = Margin::uniform(MIN_INSET);

    if let Some(position) = x_axis {
        grow(&mut margin, position.into(), AXIS_INSET);
    }
    if x_label_present {
        let side = x_axis.unwrap_or(XAxisPosition::Bottom);
        grow(&mut margin, side.into(), AXIS_LABEL_INSET);
    }
    if let Some(position) = y_axis {
        grow(&mut margin, position.into(), AXIS_INSET);
    }
    if y_label_present {
        let side = y_axis.unwrap_or(YAxisPosition::Left);
        grow(&mut margin, side.into(), AXIS_LABEL_INSET);
    }

    margin
}

/// Grows the legend's side of `base` by the footprint plus clearance.
#[must_use]
pub fn compute_margin_with_legend(
    base: Margin,
    position: LegendPosition,
    footprint: LegendFootprint,
) -> Margin {
    let mut margin = base;
    let side = position.side();
    let extent = match side {
        Side::Top | Side::Bottom => footprint.height,
        Side::Left | Side::Right => footprint.width,
    };
    grow(&mut margin, side, extent.max(0.0) + LEGEND_CLEARANCE);
    margin
}

/// Outcome of the two-pass legend/margin negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginResolution {
    pub base: Margin,
    /// Pass-1 estimate computed with an unmeasured (zero) legend.
    pub estimate: Margin,
    pub footprint: LegendFootprint,
    /// Final margin all downstream geometry derives from.
    pub margin: Margin,
}

/// Runs the measure-then-commit protocol.
///
/// Pass 1 lays out with a zero footprint, the legend is measured against that
/// estimate, and pass 2 commits the measured footprint. Because the footprint
/// depends only on the legend's entries, measuring again under the pass-2
/// margin reproduces it. A hidden legend skips measurement entirely.
pub fn resolve_margin(
    base: Margin,
    legend: LegendRequest,
    measurer: &impl LegendMeasure,
) -> MarginResolution {
    let Some(position) = legend.position() else {
        return MarginResolution {
            base,
            estimate: base,
            footprint: LegendFootprint::ZERO,
            margin: base,
        };
    };

    let estimate = compute_margin_with_legend(base, position, LegendFootprint::ZERO);
    let footprint = measurer.measure(estimate);
    let margin = compute_margin_with_legend(base, position, footprint);
    debug!(
        ?position,
        footprint_width = footprint.width,
        footprint_height = footprint.height,
        top = margin.top,
        right = margin.right,
        bottom = margin.bottom,
        left = margin.left,
        "resolved legend margin"
    );

    MarginResolution {
        base,
        estimate,
        footprint,
        margin,
    }
}

impl MarginResolution {
    /// Re-measures under the committed margin and reports whether the footprint held.
    #[must_use]
    pub fn is_fixed_point(&self, measurer: &impl LegendMeasure) -> bool {
        if self.margin == self.base {
            return true;
        }
        measurer.measure(self.margin) == self.footprint
    }
}

pub(crate) fn grow(margin: &mut Margin, side: Side, amount: f64) {
    match side {
        Side::Top => margin.top += amount,
        Side::Bottom => margin.bottom += amount,
        Side::Left => margin.left += amount,
        Side::Right => margin.right += amount,
    }
}
