mod axis_frame_builder;
mod bar_chart;
mod bar_chart_config;
mod validation;

pub use bar_chart::BarChart;
pub use bar_chart_config::{AxisConfig, BarChartConfig, ColorSpec};
