//! chart-layout: layout, scale and hit-testing engine for 2-D statistical charts.
//!
//! The crate draws nothing. Given tabular records, a chart spec and a container
//! size, it reshapes and stacks the data, derives scales, negotiates margins
//! with the legend, positions axes and builds a hit tester for tooltips.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod telemetry;

pub use api::{ChartKind, ChartLayout, ChartLayoutEngine, ChartSpec, Encoding};
pub use error::{ChartError, ChartResult};
