use serde::{Deserialize, Serialize};

/// Default inner/outer padding, in band-step units.
pub const DEFAULT_BAND_PADDING: f64 = 0.1;

/// Discrete scale assigning each category an equal-width pixel band.
///
/// Categories keep first-seen order; duplicates passed to [`BandScale::new`]
/// are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    #[must_use]
    pub fn new<I, S>(values: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut domain: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !domain.contains(&value) {
                domain.push(value);
            }
        }
        Self {
            domain,
            range_start: range.0,
            range_end: range.1,
            padding_inner: DEFAULT_BAND_PADDING,
            padding_outer: DEFAULT_BAND_PADDING,
        }
    }

    /// Sets inner (between bands) and outer (range edges) padding ratios.
    #[must_use]
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = sanitize_padding(inner).min(1.0);
        self.padding_outer = sanitize_padding(outer);
        self
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        let span = (self.range_end - self.range_start).abs();
        let denom = n - self.padding_inner + 2.0 * self.padding_outer;
        if denom <= 0.0 { 0.0 } else { span / denom }
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Band start for `index`, in pixels.
    #[must_use]
    pub fn position(&self, index: usize) -> f64 {
        let start = self.range_start.min(self.range_end);
        start + self.step() * (self.padding_outer + index as f64)
    }

    /// Band start for a category, or `None` when it is not in the domain.
    #[must_use]
    pub fn map(&self, value: &str) -> Option<f64> {
        self.index_of(value).map(|index| self.position(index))
    }

    #[must_use]
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth() / 2.0
    }

    #[must_use]
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.domain.iter().position(|candidate| candidate == value)
    }

    /// Index of the band covering `pixel`; inside padding, the nearest band center wins.
    ///
    /// Returns `None` for an empty domain or a pixel outside the range.
    #[must_use]
    pub fn index_at(&self, pixel: f64) -> Option<usize> {
        let lo = self.range_start.min(self.range_end);
        let hi = self.range_start.max(self.range_end);
        if self.domain.is_empty() || !pixel.is_finite() || pixel < lo || pixel > hi {
            return None;
        }

        let bandwidth = self.bandwidth();
        let mut best: Option<(f64, usize)> = None;
        for index in 0..self.domain.len() {
            let start = self.position(index);
            if pixel >= start && pixel <= start + bandwidth {
                return Some(index);
            }
            let distance = (self.center(index) - pixel).abs();
            if best.is_none_or(|(current, _)| distance < current) {
                best = Some((distance, index));
            }
        }
        best.map(|(_, index)| index)
    }
}

fn sanitize_padding(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
