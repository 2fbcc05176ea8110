use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::band_scale::{BandScale, DEFAULT_GAP_RATIO, validate_gap_ratio};
use crate::core::scale::LinearScale;
use crate::core::types::BoxSize;
use crate::core::value::DataPoint;
use crate::error::ChartResult;
use crate::render::{CATEGORICAL_PALETTE, Color};

/// One row reduced to the two fields a bar chart reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDatum {
    pub category: String,
    pub value: f64,
    /// `false` when `value` was coerced from a missing or non-numeric field.
    pub numeric: bool,
}

/// Rectangle for one datum, in inner-area pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub index: usize,
    pub category: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

/// Fill and spacing applied to every bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarStyle {
    fills: Vec<Color>,
    gap_ratio: f64,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            fills: CATEGORICAL_PALETTE.to_vec(),
            gap_ratio: DEFAULT_GAP_RATIO,
        }
    }
}

impl BarStyle {
    #[must_use]
    pub fn single(color: Color) -> Self {
        Self {
            fills: vec![color],
            ..Self::default()
        }
    }

    /// Bars cycle through `palette` by index. An empty palette falls back to
    /// [`CATEGORICAL_PALETTE`].
    #[must_use]
    pub fn palette(palette: Vec<Color>) -> Self {
        if palette.is_empty() {
            return Self::default();
        }
        Self {
            fills: palette,
            ..Self::default()
        }
    }

    pub fn with_gap_ratio(mut self, gap_ratio: f64) -> ChartResult<Self> {
        validate_gap_ratio(gap_ratio)?;
        self.gap_ratio = gap_ratio;
        Ok(self)
    }

    #[must_use]
    pub fn gap_ratio(&self) -> f64 {
        self.gap_ratio
    }

    #[must_use]
    pub fn fills(&self) -> &[Color] {
        &self.fills
    }

    #[must_use]
    pub fn fill_for(&self, index: usize) -> Color {
        self.fills[index % self.fills.len()]
    }
}

/// Bars plus the scales that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarGeometry {
    pub bars: Vec<BarRect>,
    pub x_scale: BandScale,
    pub y_scale: LinearScale,
    pub inner: BoxSize,
    /// Rows whose value field was missing or non-numeric.
    pub coerced_count: usize,
}

impl BarGeometry {
    #[must_use]
    pub fn domain_max(&self) -> f64 {
        self.y_scale.domain().1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Reads `x_key`/`y_key` from every row, applying the numeric coercion rule.
#[must_use]
pub fn coerce_bar_data(data: &[DataPoint], x_key: &str, y_key: &str) -> Vec<BarDatum> {
    let coerce = |point: &DataPoint| {
        let raw = point.get(y_key).and_then(|value| value.as_finite_number());
        BarDatum {
            category: point.label(x_key),
            value: raw.unwrap_or(0.0),
            numeric: raw.is_some(),
        }
    };

    #[cfg(feature = "parallel-projection")]
    {
        data.par_iter().map(coerce).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        data.iter().map(coerce).collect()
    }
}

/// Largest coerced value, floored at `0` so the value scale never inverts.
#[must_use]
pub fn value_domain_max(data: &[BarDatum]) -> f64 {
    data.iter()
        .map(|datum| OrderedFloat(datum.value))
        .max()
        .map_or(0.0, |max| max.0)
        .max(0.0)
}

/// Maps rows to bar rectangles inside an `inner`-sized drawing area.
///
/// Never fails: empty input yields no bars, malformed values count as `0`,
/// and negative values are clipped at the baseline.
#[must_use]
pub fn compute_bar_geometry(
    data: &[DataPoint],
    x_key: &str,
    y_key: &str,
    inner: BoxSize,
    style: &BarStyle,
) -> BarGeometry {
    let inner = inner.sanitized();
    let data = coerce_bar_data(data, x_key, y_key);
    let domain_max = value_domain_max(&data);

    let x_scale = BandScale::from_valid(data.len(), inner.width, style.gap_ratio);
    let y_scale = LinearScale::from_finite(0.0, domain_max, inner.height, 0.0);

    let mut coerced_count = 0;
    let mut bars = Vec::with_capacity(data.len());
    for (index, datum) in data.into_iter().enumerate() {
        if !datum.numeric {
            coerced_count += 1;
            trace!(index, category = %datum.category, "value coerced to 0");
        }
        let y = y_scale.map(datum.value).min(inner.height);
        bars.push(BarRect {
            index,
            category: datum.category,
            value: datum.value,
            x: x_scale.bar_start(index),
            y,
            width: x_scale.bar_width(),
            height: inner.height - y,
            fill: style.fill_for(index),
        });
    }

    debug!(
        bars = bars.len(),
        coerced_count,
        domain_max,
        inner_width = inner.width,
        inner_height = inner.height,
        "computed bar geometry"
    );

    BarGeometry {
        bars,
        x_scale,
        y_scale,
        inner,
        coerced_count,
    }
}

#[cfg(test)]
mod tests {
    use super::{BarDatum, value_domain_max};

    fn datum(value: f64) -> BarDatum {
        BarDatum {
            category: String::new(),
            value,
            numeric: true,
        }
    }

    #[test]
    fn domain_max_is_zero_for_empty_and_negative_data() {
        assert_eq!(value_domain_max(&[]), 0.0);
        assert_eq!(value_domain_max(&[datum(-3.0), datum(-1.0)]), 0.0);
    }

    #[test]
    fn domain_max_picks_largest_value() {
        assert_eq!(
            value_domain_max(&[datum(-10.0), datum(15.0), datum(-5.0)]),
            15.0
        );
    }
}
