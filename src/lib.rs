//! barchart-rs: responsive bar chart component.
//!
//! Two collaborating pieces make up the core: [`sizing::CanvasSizing`] tracks
//! a container's box and derives the margin-adjusted drawing area, and
//! [`core::compute_bar_geometry`] maps rows to bar rectangles through a band
//! scale and a linear value scale. [`api::BarChart`] wires both together and
//! hands frames to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod sizing;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{BarChart, BarChartConfig};
pub use error::{ChartError, ChartResult};
