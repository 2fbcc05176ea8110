use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{DEFAULT_GAP_RATIO, DataPoint, PartialMargin};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Bar fill: one color for every bar, or a palette cycled by bar index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    Palette(Vec<String>),
}

impl ColorSpec {
    #[must_use]
    pub fn single(color: impl Into<String>) -> Self {
        Self::Single(color.into())
    }

    #[must_use]
    pub fn palette<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Palette(colors.into_iter().map(Into::into).collect())
    }

    /// Parses every entry as a hex color.
    pub fn resolve(&self) -> ChartResult<Vec<Color>> {
        match self {
            Self::Single(color) => Ok(vec![Color::from_hex(color)?]),
            Self::Palette(colors) => {
                if colors.is_empty() {
                    return Err(ChartError::InvalidConfig(
                        "color palette must not be empty".to_owned(),
                    ));
                }
                colors.iter().map(|color| Color::from_hex(color)).collect()
            }
        }
    }
}

/// Per-axis presentation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    pub show: bool,
    /// Axis title.
    pub label: Option<String>,
    /// Approximate number of value ticks. Ignored by the category axis.
    pub tick_count: usize,
    pub grid_lines: bool,
    /// Fixed decimals for value tick labels; `None` picks the shortest form.
    pub precision: Option<u8>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            show: true,
            label: None,
            tick_count: 5,
            grid_lines: false,
            precision: None,
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            show: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_grid_lines(mut self, grid_lines: bool) -> Self {
        self.grid_lines = grid_lines;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }
}

/// Public chart configuration.
///
/// Serializable with camelCase keys (`xKey`, `yKey`, `gapRatio`, ...) so a
/// host can hand over the same JSON props it would give a web component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartConfig {
    #[serde(default, deserialize_with = "deserialize_data_points")]
    pub data: Vec<DataPoint>,
    pub x_key: String,
    pub y_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
    #[serde(default)]
    pub margin: PartialMargin,
    #[serde(default = "default_responsive")]
    pub responsive: bool,
    #[serde(default = "default_gap_ratio")]
    pub gap_ratio: f64,
    #[serde(default)]
    pub x_axis: AxisConfig,
    #[serde(default)]
    pub y_axis: AxisConfig,
}

impl BarChartConfig {
    #[must_use]
    pub fn new(x_key: impl Into<String>, y_key: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            x_key: x_key.into(),
            y_key: y_key.into(),
            color: None,
            margin: PartialMargin::default(),
            responsive: default_responsive(),
            gap_ratio: default_gap_ratio(),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<DataPoint>) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorSpec) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: PartialMargin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    #[must_use]
    pub fn with_gap_ratio(mut self, gap_ratio: f64) -> Self {
        self.gap_ratio = gap_ratio;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_responsive() -> bool {
    true
}

fn default_gap_ratio() -> f64 {
    DEFAULT_GAP_RATIO
}

/// Rows go through `DataPoint::from_json_value` so odd field shapes (bools,
/// nested objects) are tolerated instead of failing the whole config.
fn deserialize_data_points<'de, D>(deserializer: D) -> Result<Vec<DataPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(rows.into_iter().map(DataPoint::from_json_value).collect())
}
