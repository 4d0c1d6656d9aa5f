use crate::core::{PieSlice, PixelPoint, angle_from_center};
use crate::interaction::HitTarget;

/// Angular lookup over pie slices.
#[derive(Debug, Clone, PartialEq)]
pub struct PieIndex {
    /// Plot-local pie center.
    center: PixelPoint,
    outer_radius: f64,
    inner_radius: f64,
    slices: Vec<PieSlice>,
}

impl PieIndex {
    #[must_use]
    pub fn new(center: PixelPoint, outer_radius: f64, slices: Vec<PieSlice>) -> Self {
        Self {
            center,
            outer_radius: outer_radius.max(0.0),
            inner_radius: 0.0,
            slices,
        }
    }

    /// Donut hole; the cursor inside it hits nothing.
    #[must_use]
    pub fn with_inner_radius(mut self, inner_radius: f64) -> Self {
        self.inner_radius = inner_radius.clamp(0.0, self.outer_radius);
        self
    }

    #[must_use]
    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    #[must_use]
    pub fn locate(&self, cursor: PixelPoint) -> Option<HitTarget> {
        let distance = cursor.distance_squared(self.center).sqrt();
        if distance > self.outer_radius || distance < self.inner_radius {
            return None;
        }
        let angle = angle_from_center(self.center, cursor);
        let slice = self.slices.iter().find(|slice| slice.contains_angle(angle))?;
        let label_radius = (self.inner_radius + self.outer_radius) / 2.0;
        Some(HitTarget {
            row: slice.index,
            series_key: Some(slice.label.clone()),
            anchor: slice.centroid(self.center, label_radius),
        })
    }
}
