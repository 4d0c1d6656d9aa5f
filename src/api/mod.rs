mod chart_layout;
mod chart_spec;

pub use chart_layout::{ChartLayout, ChartLayoutEngine, PieLayout, Series, SeriesPoint, XScale};
pub use chart_spec::{ChartKind, ChartSpec, Encoding, PieOptions};
