use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_GAP_RATIO: f64 = 0.1;

/// Splits `[0, extent]` into `count` equal bands.
///
/// Each band is `step = extent / count` wide and reserves `step * gap_ratio`
/// for the inter-bar gap, split evenly on both sides of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandScale {
    count: usize,
    extent: f64,
    gap_ratio: f64,
}

impl BandScale {
    pub fn new(count: usize, extent: f64, gap_ratio: f64) -> ChartResult<Self> {
        validate_gap_ratio(gap_ratio)?;
        if !extent.is_finite() || extent < 0.0 {
            return Err(ChartError::InvalidData(
                "band extent must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self::from_valid(count, extent, gap_ratio))
    }

    pub(crate) const fn from_valid(count: usize, extent: f64, gap_ratio: f64) -> Self {
        Self {
            count,
            extent,
            gap_ratio,
        }
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn extent(self) -> f64 {
        self.extent
    }

    #[must_use]
    pub fn gap_ratio(self) -> f64 {
        self.gap_ratio
    }

    /// Full band width including the gap; `0` for an empty scale.
    #[must_use]
    pub fn step(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.extent / self.count as f64
    }

    #[must_use]
    pub fn gap(self) -> f64 {
        self.step() * self.gap_ratio
    }

    /// Drawable bar width inside one band.
    #[must_use]
    pub fn bar_width(self) -> f64 {
        self.step() - self.gap()
    }

    /// Left edge of band `index`, gap included.
    #[must_use]
    pub fn band_start(self, index: usize) -> f64 {
        index as f64 * self.step()
    }

    /// Left edge of the bar inside band `index`.
    #[must_use]
    pub fn bar_start(self, index: usize) -> f64 {
        self.band_start(index) + self.gap() * 0.5
    }

    #[must_use]
    pub fn band_center(self, index: usize) -> f64 {
        self.band_start(index) + self.step() * 0.5
    }
}

pub(crate) fn validate_gap_ratio(gap_ratio: f64) -> ChartResult<()> {
    if !gap_ratio.is_finite() || !(0.0..1.0).contains(&gap_ratio) {
        return Err(ChartError::InvalidData(
            "gap ratio must be finite and in [0, 1)".to_owned(),
        ));
    }
    Ok(())
}
