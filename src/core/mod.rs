pub mod band_scale;
pub mod color;
pub mod data_type;
pub mod pie;
pub mod record;
pub mod reshape;
pub mod scale;
pub mod stack;
pub mod ticks;
pub mod types;

pub use band_scale::{BandScale, DEFAULT_BAND_PADDING};
pub use color::{CATEGORY10, Color, ColorScale};
pub use data_type::{DataType, FieldAccessor, infer_data_type, parse_date_like};
pub use pie::{PieSlice, RadiusSpec, angle_from_center, outer_radius, pie_slices, resolve_radius};
pub use record::{Dataset, Record, Value, dataset_from_json_str};
pub use reshape::{collect_series_keys, order_rows_by_x, reshape_skinny_to_wide};
pub use scale::{ContinuousScale, ScaleKind, extent};
pub use stack::{Layer, StackPoint, build_stack, stack_domain_max, stack_domain_min};
pub use types::{Margin, PixelPoint, PlotArea, Viewport};
