use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from 8-bit channels.
    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let hex = input.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
        };
        match (hex.len(), channel(0..2), channel(2..4), channel(4..6)) {
            (6, Some(red), Some(green), Some(blue)) => Ok(Self::from_rgb8(red, green, blue)),
            _ => Err(ChartError::InvalidData(format!(
                "color `{input}` is not a #rrggbb hex string"
            ))),
        }
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let to_u8 = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            to_u8(self.red),
            to_u8(self.green),
            to_u8(self.blue)
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// The ten "category10" colors used when no palette is configured.
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

/// Ordinal mapping from series key to palette color.
///
/// Keys receive colors by first-seen index, wrapping around the palette.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    palette: Vec<Color>,
    domain: Vec<String>,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::new(CATEGORY10.to_vec())
    }
}

impl ColorScale {
    /// Creates a scale over `palette`; an empty palette falls back to [`CATEGORY10`].
    #[must_use]
    pub fn new(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            CATEGORY10.to_vec()
        } else {
            palette
        };
        Self {
            palette,
            domain: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_domain<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            self.register(key.into());
        }
        self
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Color for a known key without extending the domain.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Color> {
        self.domain
            .iter()
            .position(|candidate| candidate == key)
            .map(|index| self.palette[index % self.palette.len()])
    }

    /// Color for `key`, appending it to the domain when unseen.
    pub fn color(&mut self, key: &str) -> Color {
        let index = self.register(key.to_owned());
        self.palette[index % self.palette.len()]
    }

    fn register(&mut self, key: String) -> usize {
        match self.domain.iter().position(|candidate| *candidate == key) {
            Some(index) => index,
            None => {
                self.domain.push(key);
                self.domain.len() - 1
            }
        }
    }
}
