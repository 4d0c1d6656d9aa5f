use serde::{Deserialize, Serialize};

use crate::core::{Color, DEFAULT_BAND_PADDING, DataType, RadiusSpec};
use crate::error::{ChartError, ChartResult};
use crate::layout::{AxisLabelLocale, LegendRequest, LegendStyle, XAxisPosition, YAxisPosition};

/// Chart family; selects stacking, scales and the hit-testing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Area,
    Line,
    Scatter,
    Bar,
    Pie,
}

impl ChartKind {
    /// Kinds whose series are stacked into layers.
    #[must_use]
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::Area | Self::Bar)
    }
}

/// Which record fields feed the chart.
///
/// For pie charts `x_key` names the slice label and `y_key` its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    pub x_key: String,
    pub y_key: String,
    #[serde(default)]
    pub group_key: Option<String>,
    /// Declared x type; inferred from the first record when absent.
    #[serde(default)]
    pub x_data_type: Option<DataType>,
}

impl Encoding {
    #[must_use]
    pub fn new(x_key: impl Into<String>, y_key: impl Into<String>) -> Self {
        Self {
            x_key: x_key.into(),
            y_key: y_key.into(),
            group_key: None,
            x_data_type: None,
        }
    }

    #[must_use]
    pub fn with_group_key(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }

    #[must_use]
    pub fn with_x_data_type(mut self, data_type: DataType) -> Self {
        self.x_data_type = Some(data_type);
        self
    }
}

/// Pie-only options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PieOptions {
    /// Fits the plot area when absent.
    #[serde(default)]
    pub outer_radius: Option<RadiusSpec>,
    #[serde(default)]
    pub inner_radius: Option<RadiusSpec>,
}

/// Serializable chart configuration.
///
/// Hosts can persist and reload a chart setup as JSON. An axis set to `false`
/// or `null` is hidden; `true` selects its default side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub encoding: Encoding,
    #[serde(default = "default_x_axis", with = "axis_setting")]
    pub x_axis: Option<XAxisPosition>,
    #[serde(default = "default_y_axis", with = "axis_setting")]
    pub y_axis: Option<YAxisPosition>,
    #[serde(default)]
    pub x_axis_label: Option<String>,
    #[serde(default)]
    pub y_axis_label: Option<String>,
    #[serde(default)]
    pub legend: LegendRequest,
    #[serde(default)]
    pub legend_style: LegendStyle,
    /// Series colors; empty selects the category10 palette.
    #[serde(default)]
    pub palette: Vec<Color>,
    #[serde(default = "default_band_padding")]
    pub band_padding: f64,
    #[serde(default)]
    pub x_grid: bool,
    #[serde(default)]
    pub y_grid: bool,
    #[serde(default)]
    pub locale: AxisLabelLocale,
    #[serde(default)]
    pub pie: PieOptions,
}

impl ChartSpec {
    #[must_use]
    pub fn new(kind: ChartKind, encoding: Encoding) -> Self {
        Self {
            kind,
            encoding,
            x_axis: default_x_axis(),
            y_axis: default_y_axis(),
            x_axis_label: None,
            y_axis_label: None,
            legend: LegendRequest::default(),
            legend_style: LegendStyle::default(),
            palette: Vec::new(),
            band_padding: default_band_padding(),
            x_grid: false,
            y_grid: false,
            locale: AxisLabelLocale::default(),
            pie: PieOptions::default(),
        }
    }

    #[must_use]
    pub fn with_x_axis(mut self, position: Option<XAxisPosition>) -> Self {
        self.x_axis = position;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, position: Option<YAxisPosition>) -> Self {
        self.y_axis = position;
        self
    }

    #[must_use]
    pub fn with_x_axis_label(mut self, label: impl Into<String>) -> Self {
        self.x_axis_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_y_axis_label(mut self, label: impl Into<String>) -> Self {
        self.y_axis_label = Some(label.into());
        self
    }

    /// Accepts `true`/`false` or a [`crate::layout::LegendPosition`].
    #[must_use]
    pub fn with_legend(mut self, legend: impl Into<LegendRequest>) -> Self {
        self.legend = legend.into();
        self
    }

    #[must_use]
    pub fn with_legend_style(mut self, style: LegendStyle) -> Self {
        self.legend_style = style;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_band_padding(mut self, padding: f64) -> Self {
        self.band_padding = padding;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, x_grid: bool, y_grid: bool) -> Self {
        self.x_grid = x_grid;
        self.y_grid = y_grid;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: AxisLabelLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_pie_options(mut self, pie: PieOptions) -> Self {
        self.pie = pie;
        self
    }

    /// Rejects configurations no layout pass could honor.
    pub fn validate(&self) -> ChartResult<()> {
        if self.encoding.x_key.trim().is_empty() || self.encoding.y_key.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "encoding x_key and y_key must not be empty".to_owned(),
            ));
        }
        if let Some(group_key) = &self.encoding.group_key {
            if group_key.trim().is_empty() {
                return Err(ChartError::InvalidData(
                    "encoding group_key must not be empty when set".to_owned(),
                ));
            }
        }
        if !self.band_padding.is_finite() || !(0.0..1.0).contains(&self.band_padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        let style = self.legend_style;
        for (name, value) in [
            ("swatch_radius", style.swatch_radius),
            ("label_gap", style.label_gap),
            ("row_spacing", style.row_spacing),
            ("char_width", style.char_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "legend style `{name}` must be finite and >= 0"
                )));
            }
        }
        for color in &self.palette {
            color.validate()?;
        }
        Ok(())
    }

    /// Serializes the spec to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart spec: {e}")))
    }

    /// Deserializes a spec from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart spec: {e}")))
    }
}

fn default_x_axis() -> Option<XAxisPosition> {
    Some(XAxisPosition::default())
}

fn default_y_axis() -> Option<YAxisPosition> {
    Some(YAxisPosition::default())
}

/// Axis request in JSON: a side name, `true`, `false` or `null`.
mod axis_setting {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AxisSetting<P> {
        Flag(bool),
        Position(P),
    }

    pub fn serialize<S, P>(value: &Option<P>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        P: Serialize,
    {
        match value {
            Some(position) => position.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D, P>(deserializer: D) -> Result<Option<P>, D::Error>
    where
        D: Deserializer<'de>,
        P: Deserialize<'de> + Default,
    {
        Ok(match Option::<AxisSetting<P>>::deserialize(deserializer)? {
            None | Some(AxisSetting::Flag(false)) => None,
            Some(AxisSetting::Flag(true)) => Some(P::default()),
            Some(AxisSetting::Position(position)) => Some(position),
        })
    }
}

fn default_band_padding() -> f64 {
    DEFAULT_BAND_PADDING
}
