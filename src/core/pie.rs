use std::f64::consts::TAU;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::types::{Margin, PixelPoint, Viewport};
use crate::error::ChartError;

/// Requested pie radius: absolute pixels or a percentage of the available half-extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RadiusSpec {
    Pixels(f64),
    #[serde(with = "percent_string")]
    Percent(f64),
}

impl FromStr for RadiusSpec {
    type Err = ChartError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let parsed = match trimmed.strip_suffix('%') {
            Some(percent) => percent.trim().parse::<f64>().map(Self::Percent),
            None => trimmed.parse::<f64>().map(Self::Pixels),
        };
        parsed.map_err(|e| ChartError::InvalidData(format!("invalid radius `{input}`: {e}")))
    }
}

mod percent_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value}%"))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .strip_suffix('%')
            .and_then(|percent| percent.trim().parse::<f64>().ok())
            .ok_or_else(|| serde::de::Error::custom(format!("expected `<number>%`, got `{raw}`")))
    }
}

/// Resolves a requested radius against the container.
///
/// Percentages scale the margin-reduced half-extent; pixel requests larger than
/// the container's half-extent shrink to fit below the top margin.
#[must_use]
pub fn resolve_radius(viewport: Viewport, radius: RadiusSpec, margin: Margin) -> f64 {
    let width = viewport.width_px();
    let height = viewport.height_px();
    match radius {
        RadiusSpec::Percent(percent) => {
            percent * ((height - margin.top) / 2.0).min((width - margin.left) / 2.0) * 0.01
        }
        RadiusSpec::Pixels(pixels) => {
            let half_extent = (height / 2.0).min(width / 2.0);
            if pixels > half_extent {
                half_extent - margin.top
            } else {
                pixels
            }
        }
    }
}

/// Largest radius fitting inside the plot area.
#[must_use]
pub fn outer_radius(viewport: Viewport, margin: Margin) -> f64 {
    let plot = margin.plot_area(viewport);
    (plot.height / 2.0).min(plot.width / 2.0)
}

/// One pie wedge. Angles are radians, clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub index: usize,
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    #[must_use]
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }

    /// Point at the middle of the wedge, at `radius` from the center.
    #[must_use]
    pub fn centroid(&self, center: PixelPoint, radius: f64) -> PixelPoint {
        let mid = (self.start_angle + self.end_angle) / 2.0;
        PixelPoint::new(center.x + radius * mid.sin(), center.y - radius * mid.cos())
    }
}

/// Splits the full circle proportionally to `values`, in input order.
///
/// Negative and non-finite values get an empty wedge. When every value is
/// empty, all wedges are empty.
#[must_use]
pub fn pie_slices(values: &[(String, f64)]) -> Vec<PieSlice> {
    let sanitized: Vec<f64> = values
        .iter()
        .map(|(_, value)| if value.is_finite() { value.max(0.0) } else { 0.0 })
        .collect();
    let total: f64 = sanitized.iter().sum();

    let mut angle = 0.0;
    values
        .iter()
        .zip(sanitized)
        .enumerate()
        .map(|(index, ((label, _), value))| {
            let sweep = if total > 0.0 { value / total * TAU } else { 0.0 };
            let slice = PieSlice {
                index,
                label: label.clone(),
                value,
                start_angle: angle,
                end_angle: angle + sweep,
            };
            angle += sweep;
            slice
        })
        .collect()
}

/// Clockwise angle from 12 o'clock of `point` around `center`, in `[0, 2π)`.
#[must_use]
pub fn angle_from_center(center: PixelPoint, point: PixelPoint) -> f64 {
    let angle = (point.x - center.x).atan2(center.y - point.y);
    if angle < 0.0 { angle + TAU } else { angle }
}
