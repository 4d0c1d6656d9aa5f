use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::chart_spec::{ChartKind, ChartSpec};
use crate::core::{
    BandScale, Color, ColorScale, ContinuousScale, DataType, FieldAccessor, Layer, Margin,
    PieSlice, PixelPoint, PlotArea, Record, ScaleKind, Value, Viewport, build_stack,
    collect_series_keys, extent, infer_data_type, order_rows_by_x, outer_radius, pie_slices,
    reshape_skinny_to_wide, resolve_radius, stack_domain_max, stack_domain_min,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    BandIndex, HitStrategy, HitTester, NearestXIndex, PieIndex, SeriesColumn, TooltipState,
    VoronoiIndex, VoronoiSeed,
};
use crate::layout::{
    AxisGeometry, AxisTitle, ContinuousAxisOptions, LegendLayout, LegendRow, MarginResolution,
    XAxisPosition, YAxisPosition, axis_title, band_axis, compute_base_margin, continuous_axis,
    grid_lines, horizontal_tick_count, resolve_margin, vertical_tick_count, x_axis_anchor,
    y_axis_anchor,
};

/// Horizontal scale of a cartesian chart.
#[derive(Debug, Clone, PartialEq)]
pub enum XScale {
    Continuous(ContinuousScale),
    Band(BandScale),
}

impl XScale {
    #[must_use]
    pub fn as_continuous(&self) -> Option<&ContinuousScale> {
        match self {
            Self::Continuous(scale) => Some(scale),
            Self::Band(_) => None,
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Band(scale) => Some(scale),
            Self::Continuous(_) => None,
        }
    }
}

/// One plotted point of a line or scatter series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Index of the source record in the input dataset.
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub pixel: PixelPoint,
}

/// Line or scatter series in drawing order. `key` is `None` when ungrouped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: Option<String>,
    pub color: Color,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieLayout {
    /// Plot-local center.
    pub center: PixelPoint,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub slices: Vec<PieSlice>,
    pub colors: Vec<Color>,
}

/// Result of one layout pass: every derived position plus a hit tester.
///
/// Geometry is plot-local unless noted; the plot origin sits at
/// `(margin.left, margin.top)` in the container.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub kind: ChartKind,
    pub viewport: Viewport,
    /// Both legend passes; `margins.margin` excludes band tick margin.
    pub margins: MarginResolution,
    pub margin: Margin,
    pub plot: PlotArea,
    pub x_data_type: Option<DataType>,
    /// Distinct group values in first-seen order; empty when ungrouped.
    pub series_keys: Vec<String>,
    /// Rows the layers and hit results index into.
    pub rows: Vec<Record>,
    pub x_scale: Option<XScale>,
    pub y_scale: Option<ContinuousScale>,
    pub layers: Vec<Layer>,
    /// Colors of each layer, aligned with `layers`.
    pub layer_colors: Vec<Color>,
    pub series: Vec<Series>,
    pub legend: Option<LegendLayout>,
    pub legend_rows: Vec<LegendRow>,
    pub x_axis: Option<AxisGeometry>,
    pub y_axis: Option<AxisGeometry>,
    pub x_title: Option<AxisTitle>,
    pub y_title: Option<AxisTitle>,
    pub pie: Option<PieLayout>,
    hit_tester: HitTester,
}

impl ChartLayout {
    #[must_use]
    pub fn hit_tester(&self) -> &HitTester {
        &self.hit_tester
    }

    /// Tooltip state for a plot-local cursor position.
    #[must_use]
    pub fn hit_test(&self, cursor: PixelPoint) -> TooltipState {
        self.hit_tester.hit_test(cursor)
    }

    /// Tooltip state for a container-space cursor position.
    #[must_use]
    pub fn hit_test_container(&self, x: f64, y: f64) -> TooltipState {
        self.hit_test(PixelPoint::new(x - self.margin.left, y - self.margin.top))
    }

    #[must_use]
    pub fn on_pointer_leave(&self) -> TooltipState {
        self.hit_tester.on_pointer_leave()
    }
}

/// Turns a dataset and a viewport into a [`ChartLayout`] for one [`ChartSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayoutEngine {
    spec: ChartSpec,
}

impl ChartLayoutEngine {
    pub fn new(spec: ChartSpec) -> ChartResult<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    #[must_use]
    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    /// Runs the full pipeline: shape, stack, measure the legend, resolve the
    /// margin, derive scales and axes, and index the marks for hit testing.
    ///
    /// The dataset is never mutated. Re-run on every data or viewport change.
    pub fn layout(&self, dataset: &[Record], viewport: Viewport) -> ChartResult<ChartLayout> {
        if dataset.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let layout = match self.spec.kind {
            ChartKind::Pie => self.layout_pie(dataset, viewport)?,
            _ => self.layout_cartesian(dataset, viewport)?,
        };
        debug!(
            kind = ?layout.kind,
            width = viewport.width,
            height = viewport.height,
            rows = layout.rows.len(),
            series = layout.series_keys.len(),
            plot_width = layout.plot.width,
            plot_height = layout.plot.height,
            "chart layout pass"
        );
        Ok(layout)
    }

    fn layout_cartesian(&self, dataset: &[Record], viewport: Viewport) -> ChartResult<ChartLayout> {
        let spec = &self.spec;
        let encoding = &spec.encoding;
        let kind = spec.kind;
        let first = dataset.first().ok_or(ChartError::EmptyDataset)?;

        let series_keys = match encoding.group_key.as_deref() {
            Some(group_key) => collect_series_keys(dataset, group_key)?,
            None => Vec::new(),
        };
        let grouped = encoding.group_key.is_some();
        let value_keys = if grouped {
            series_keys.clone()
        } else {
            vec![encoding.y_key.clone()]
        };

        let x_accessor = match kind {
            ChartKind::Bar => None,
            _ => {
                let data_type = match encoding.x_data_type {
                    Some(data_type) => data_type,
                    None => infer_data_type(first, &encoding.x_key)?,
                };
                Some(FieldAccessor::new(&encoding.x_key, data_type))
            }
        };
        let y_accessor = FieldAccessor::number(&encoding.y_key);

        let wide = match encoding.group_key.as_deref() {
            Some(group_key) if kind != ChartKind::Scatter => reshape_skinny_to_wide(
                dataset,
                &series_keys,
                group_key,
                &encoding.x_key,
                &encoding.y_key,
            ),
            _ => dataset.to_vec(),
        };
        let rows = match (&x_accessor, kind) {
            (Some(accessor), ChartKind::Area | ChartKind::Line) => order_rows_by_x(&wide, accessor),
            _ => wide,
        };
        let layers = if kind.is_stacked() {
            build_stack(&rows, &value_keys)
        } else {
            Vec::new()
        };

        let mut colors =
            ColorScale::new(spec.palette.clone()).with_domain(value_keys.iter().cloned());
        let legend = spec.legend.position().map(|position| {
            LegendLayout::from_keys(position, &value_keys, &mut colors)
                .with_style(spec.legend_style)
        });

        let base = compute_base_margin(
            spec.x_axis,
            spec.y_axis,
            spec.x_axis_label.is_some(),
            spec.y_axis_label.is_some(),
        );
        let margins = resolve_margin(base, spec.legend, &legend);
        let mut margin = margins.margin;
        let mut plot = margin.plot_area(viewport);

        // Band geometry depends on plot width only, so growing the bottom
        // inset for rotated labels leaves the band layout untouched.
        let mut band_layout = None;
        if kind == ChartKind::Bar {
            let categories: Vec<String> = rows
                .iter()
                .map(|record| {
                    record
                        .get(&encoding.x_key)
                        .map(Value::to_string)
                        .unwrap_or_default()
                })
                .collect();
            let band = BandScale::new(categories.iter().cloned(), (0.0, plot.width))
                .with_padding(spec.band_padding, spec.band_padding);
            let band_rows: Vec<usize> = band
                .domain()
                .iter()
                .filter_map(|category| categories.iter().position(|value| value == category))
                .collect();

            let tick_margin = spec.x_axis.map_or(0.0, |position| {
                band_axis(
                    &band,
                    position.into(),
                    spec.locale,
                    x_axis_anchor(position, viewport, margin),
                    plot,
                )
                .tick_margin
            });
            if tick_margin > 0.0 {
                margin.bottom += tick_margin;
                plot = margin.plot_area(viewport);
            }
            band_layout = Some((band, band_rows));
        }

        if plot.is_empty() {
            warn!(
                width = viewport.width,
                height = viewport.height,
                top = margin.top,
                right = margin.right,
                bottom = margin.bottom,
                left = margin.left,
                "plot area collapsed; geometry clamped to zero size"
            );
        }

        let vertical_ticks = vertical_tick_count(viewport.height_px());
        let y_domain = if kind.is_stacked() {
            (stack_domain_min(&layers), stack_domain_max(&layers))
        } else {
            extent(dataset, |record| y_accessor.value(record))?
        };
        let y_scale = ContinuousScale::new(ScaleKind::Linear, y_domain, (plot.height, 0.0))?
            .nice(vertical_ticks);

        let x_scale = match (&band_layout, &x_accessor) {
            (Some((band, _)), _) => XScale::Band(band.clone()),
            (None, Some(accessor)) => XScale::Continuous(ContinuousScale::from_extent(
                accessor.data_type.into(),
                dataset,
                accessor,
                (0.0, plot.width),
            )?),
            (None, None) => {
                return Err(ChartError::InvalidData(
                    "continuous chart without an x accessor".to_owned(),
                ));
            }
        };

        let x_axis = spec.x_axis.map(|position| {
            let anchor = x_axis_anchor(position, viewport, margin);
            match &x_scale {
                XScale::Band(band) => {
                    let mut axis = band_axis(band, position.into(), spec.locale, anchor, plot);
                    if spec.x_grid {
                        axis.grid_lines =
                            grid_lines(axis.side, axis.ticks.iter().map(|tick| tick.offset), plot);
                    }
                    axis
                }
                XScale::Continuous(scale) => continuous_axis(
                    scale,
                    ContinuousAxisOptions {
                        side: position.into(),
                        data_type: x_accessor
                            .as_ref()
                            .map_or(DataType::Number, |accessor| accessor.data_type),
                        locale: spec.locale,
                        tick_count: horizontal_tick_count(viewport.width_px()),
                        include_extrema: matches!(kind, ChartKind::Area | ChartKind::Line),
                        grid: spec.x_grid,
                    },
                    anchor,
                    plot,
                ),
            }
        });
        let y_axis = spec.y_axis.map(|position| {
            continuous_axis(
                &y_scale,
                ContinuousAxisOptions {
                    side: position.into(),
                    data_type: DataType::Number,
                    locale: spec.locale,
                    tick_count: vertical_ticks,
                    include_extrema: false,
                    grid: spec.y_grid,
                },
                y_axis_anchor(position, viewport, margin),
                plot,
            )
        });
        let (x_title, y_title) = self.axis_titles(viewport, margin, plot);

        let series = match (&x_scale, &x_accessor) {
            (XScale::Continuous(x_scale), Some(x_accessor))
                if matches!(kind, ChartKind::Line | ChartKind::Scatter) =>
            {
                build_series(
                    dataset,
                    encoding.group_key.as_deref(),
                    &value_keys,
                    (x_accessor, &y_accessor),
                    (x_scale, &y_scale),
                    &mut colors,
                    kind == ChartKind::Line,
                )
            }
            _ => Vec::new(),
        };
        let layer_colors = layers.iter().map(|layer| colors.color(&layer.key)).collect();

        let legend_rows = legend
            .as_ref()
            .map(|legend| legend.rows(legend.origin(viewport, margin)))
            .unwrap_or_default();

        let strategy = match (&x_scale, &x_accessor) {
            (XScale::Band(band), _) => {
                let band_rows = band_layout
                    .map(|(_, band_rows)| band_rows)
                    .unwrap_or_default();
                HitStrategy::Band(BandIndex::new(
                    band.clone(),
                    band_rows,
                    y_scale,
                    stacked_columns(&rows, &layers, grouped),
                ))
            }
            (XScale::Continuous(x_scale), Some(x_accessor)) => match kind {
                ChartKind::Scatter => HitStrategy::Voronoi(VoronoiIndex::build(
                    scatter_seeds(
                        &rows,
                        encoding.group_key.as_deref(),
                        (x_accessor, &y_accessor),
                        (x_scale, &y_scale),
                    ),
                    plot,
                )),
                _ => {
                    let xs = rows.iter().map(|record| x_accessor.value(record)).collect();
                    let columns = if kind.is_stacked() {
                        stacked_columns(&rows, &layers, grouped)
                    } else {
                        raw_columns(&rows, &value_keys, grouped)
                    };
                    HitStrategy::NearestX(NearestXIndex::new(*x_scale, y_scale, xs, columns))
                }
            },
            (XScale::Continuous(_), None) => {
                return Err(ChartError::InvalidData(
                    "continuous chart without an x accessor".to_owned(),
                ));
            }
        };
        let hit_tester = HitTester::new(strategy, rows.clone(), viewport, margin);

        Ok(ChartLayout {
            kind,
            viewport,
            margins,
            margin,
            plot,
            x_data_type: x_accessor.as_ref().map(|accessor| accessor.data_type),
            series_keys,
            rows,
            x_scale: Some(x_scale),
            y_scale: Some(y_scale),
            layers,
            layer_colors,
            series,
            legend,
            legend_rows,
            x_axis,
            y_axis,
            x_title,
            y_title,
            pie: None,
            hit_tester,
        })
    }

    fn layout_pie(&self, dataset: &[Record], viewport: Viewport) -> ChartResult<ChartLayout> {
        let spec = &self.spec;
        let encoding = &spec.encoding;

        let values: Vec<(String, f64)> = dataset
            .iter()
            .map(|record| {
                let label = record
                    .get(&encoding.x_key)
                    .map(Value::to_string)
                    .unwrap_or_default();
                let value = record
                    .get(&encoding.y_key)
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                (label, value)
            })
            .collect();
        let mut keys: Vec<String> = Vec::new();
        for (label, _) in &values {
            if !keys.contains(label) {
                keys.push(label.clone());
            }
        }

        let mut colors = ColorScale::new(spec.palette.clone()).with_domain(keys.iter().cloned());
        let legend = spec.legend.position().map(|position| {
            LegendLayout::from_keys(position, &keys, &mut colors).with_style(spec.legend_style)
        });

        let base = compute_base_margin(None, None, false, false);
        let margins = resolve_margin(base, spec.legend, &legend);
        let margin = margins.margin;
        let plot = margin.plot_area(viewport);
        if plot.is_empty() {
            warn!(
                width = viewport.width,
                height = viewport.height,
                "plot area collapsed; pie radius clamped to zero"
            );
        }

        let outer = spec
            .pie
            .outer_radius
            .map_or_else(
                || outer_radius(viewport, margin),
                |radius| resolve_radius(viewport, radius, margin),
            )
            .max(0.0);
        let inner = spec
            .pie
            .inner_radius
            .map_or(0.0, |radius| resolve_radius(viewport, radius, margin))
            .clamp(0.0, outer);
        let center = PixelPoint::new(plot.width / 2.0, plot.height / 2.0);
        let slices = pie_slices(&values);
        let slice_colors = slices.iter().map(|slice| colors.color(&slice.label)).collect();

        let legend_rows = legend
            .as_ref()
            .map(|legend| legend.rows(legend.origin(viewport, margin)))
            .unwrap_or_default();
        let rows = dataset.to_vec();
        let hit_tester = HitTester::new(
            HitStrategy::Pie(PieIndex::new(center, outer, slices.clone()).with_inner_radius(inner)),
            rows.clone(),
            viewport,
            margin,
        );

        Ok(ChartLayout {
            kind: ChartKind::Pie,
            viewport,
            margins,
            margin,
            plot,
            x_data_type: None,
            series_keys: keys,
            rows,
            x_scale: None,
            y_scale: None,
            layers: Vec::new(),
            layer_colors: Vec::new(),
            series: Vec::new(),
            legend,
            legend_rows,
            x_axis: None,
            y_axis: None,
            x_title: None,
            y_title: None,
            pie: Some(PieLayout {
                center,
                outer_radius: outer,
                inner_radius: inner,
                slices,
                colors: slice_colors,
            }),
            hit_tester,
        })
    }

    fn axis_titles(
        &self,
        viewport: Viewport,
        margin: Margin,
        plot: PlotArea,
    ) -> (Option<AxisTitle>, Option<AxisTitle>) {
        let spec = &self.spec;
        let x_title = spec.x_axis_label.as_ref().map(|text| {
            let position = spec.x_axis.unwrap_or(XAxisPosition::Bottom);
            axis_title(
                text.clone(),
                position.into(),
                spec.x_axis.is_some(),
                x_axis_anchor(position, viewport, margin),
                plot,
            )
        });
        let y_title = spec.y_axis_label.as_ref().map(|text| {
            let position = spec.y_axis.unwrap_or(YAxisPosition::Left);
            axis_title(
                text.clone(),
                position.into(),
                spec.y_axis.is_some(),
                y_axis_anchor(position, viewport, margin),
                plot,
            )
        });
        (x_title, y_title)
    }
}

/// Stacked tops per layer; cells the row never set stay missing.
fn stacked_columns(rows: &[Record], layers: &[Layer], grouped: bool) -> Vec<SeriesColumn> {
    layers
        .iter()
        .map(|layer| {
            let values = layer
                .points
                .iter()
                .map(|point| {
                    rows.get(point.row)
                        .and_then(|record| record.get(&layer.key))
                        .and_then(Value::as_f64)
                        .map(|_| point.y1)
                })
                .collect();
            SeriesColumn::new(grouped.then(|| layer.key.clone()), values)
        })
        .collect()
}

fn raw_columns(rows: &[Record], keys: &[String], grouped: bool) -> Vec<SeriesColumn> {
    keys.iter()
        .map(|key| {
            let values = rows
                .iter()
                .map(|record| record.get(key).and_then(Value::as_f64))
                .collect();
            SeriesColumn::new(grouped.then(|| key.clone()), values)
        })
        .collect()
}

fn scatter_seeds(
    rows: &[Record],
    group_key: Option<&str>,
    (x_accessor, y_accessor): (&FieldAccessor, &FieldAccessor),
    (x_scale, y_scale): (&ContinuousScale, &ContinuousScale),
) -> Vec<VoronoiSeed> {
    rows.iter()
        .enumerate()
        .filter_map(|(row, record)| {
            let x = x_accessor.value(record)?;
            let y = y_accessor.value(record)?;
            Some(VoronoiSeed {
                row,
                series_key: group_key
                    .and_then(|key| record.get(key))
                    .map(Value::to_string),
                position: PixelPoint::new(x_scale.map(x), y_scale.map(y)),
            })
        })
        .collect()
}

fn build_series(
    dataset: &[Record],
    group_key: Option<&str>,
    value_keys: &[String],
    (x_accessor, y_accessor): (&FieldAccessor, &FieldAccessor),
    (x_scale, y_scale): (&ContinuousScale, &ContinuousScale),
    colors: &mut ColorScale,
    sort_by_x: bool,
) -> Vec<Series> {
    value_keys
        .iter()
        .map(|key| {
            let mut points: Vec<SeriesPoint> = dataset
                .iter()
                .enumerate()
                .filter(|(_, record)| match group_key {
                    Some(group_key) => record
                        .get(group_key)
                        .is_some_and(|value| value.to_string() == *key),
                    None => true,
                })
                .filter_map(|(row, record)| {
                    let x = x_accessor.value(record)?;
                    let y = y_accessor.value(record)?;
                    Some(SeriesPoint {
                        row,
                        x,
                        y,
                        pixel: PixelPoint::new(x_scale.map(x), y_scale.map(y)),
                    })
                })
                .collect();
            if sort_by_x {
                points.sort_by(|left, right| left.x.total_cmp(&right.x));
            }
            Series {
                key: group_key.map(|_| key.clone()),
                color: colors.color(key),
                points,
            }
        })
        .collect()
}
