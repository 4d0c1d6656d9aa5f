pub mod axis;
pub mod label_format;
pub mod legend;
pub mod margin;

pub use axis::{
    AxisGeometry, AxisTick, AxisTitle, ContinuousAxisOptions, Segment, TextAnchor, TextBaseline,
    axis_line, axis_title, band_axis, continuous_axis, grid_lines,
    horizontal_tick_count, tick_label_anchor, vertical_tick_count, with_boundary_ticks,
    x_axis_anchor, y_axis_anchor,
};
pub use label_format::{AxisLabelLocale, format_category, format_date_millis, format_number};
pub use legend::{LegendEntry, LegendLayout, LegendRow, LegendStyle};
pub use margin::{
    AXIS_INSET, AXIS_LABEL_INSET, LEGEND_CLEARANCE, LegendAlign, LegendFootprint, LegendMeasure,
    LegendPosition, LegendRequest, MIN_INSET, MarginResolution, Side, XAxisPosition,
    YAxisPosition, compute_base_margin, compute_margin_with_legend, resolve_margin,
};
