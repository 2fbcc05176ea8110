use crate::core::BarStyle;
use crate::error::{ChartError, ChartResult};

use super::{AxisConfig, BarChartConfig};

const MAX_TICK_COUNT: usize = 50;
const MAX_PRECISION: u8 = 12;

/// Checks the config and resolves its bar style.
pub(super) fn validate_bar_chart_config(config: &BarChartConfig) -> ChartResult<BarStyle> {
    if config.x_key.is_empty() {
        return Err(ChartError::InvalidConfig("xKey must not be empty".to_owned()));
    }
    if config.y_key.is_empty() {
        return Err(ChartError::InvalidConfig("yKey must not be empty".to_owned()));
    }

    config.margin.validate()?;
    validate_axis_config("xAxis", &config.x_axis)?;
    validate_axis_config("yAxis", &config.y_axis)?;
    resolve_bar_style(config)
}

pub(super) fn resolve_bar_style(config: &BarChartConfig) -> ChartResult<BarStyle> {
    let style = match &config.color {
        Some(color) => BarStyle::palette(color.resolve()?),
        None => BarStyle::default(),
    };
    style
        .with_gap_ratio(config.gap_ratio)
        .map_err(|_| ChartError::InvalidConfig("gapRatio must be finite and in [0, 1)".to_owned()))
}

fn validate_axis_config(name: &str, axis: &AxisConfig) -> ChartResult<()> {
    if axis.tick_count > MAX_TICK_COUNT {
        return Err(ChartError::InvalidConfig(format!(
            "{name}.tickCount must be <= {MAX_TICK_COUNT}"
        )));
    }
    if let Some(precision) = axis.precision {
        if precision > MAX_PRECISION {
            return Err(ChartError::InvalidConfig(format!(
                "{name}.precision must be <= {MAX_PRECISION}"
            )));
        }
    }
    if axis.label.as_deref().is_some_and(|label| label.trim().is_empty()) {
        return Err(ChartError::InvalidConfig(format!(
            "{name}.label must not be blank"
        )));
    }
    Ok(())
}
