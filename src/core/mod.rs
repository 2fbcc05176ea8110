pub mod band_scale;
pub mod bar_geometry;
pub mod scale;
pub mod types;
pub mod value;

pub use band_scale::{BandScale, DEFAULT_GAP_RATIO};
pub use bar_geometry::{
    BarDatum, BarGeometry, BarRect, BarStyle, coerce_bar_data, compute_bar_geometry,
    value_domain_max,
};
pub use scale::{LinearScale, Ticks};
pub use types::{BoxSize, Dimensions, Margin, PartialMargin};
pub use value::{DataPoint, FieldValue, coerce_numeric, data_points_from_json_str};
