use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Upper bound on generated ticks, independent of the requested count.
const MAX_TICKS: usize = 64;

pub type Ticks = SmallVec<[f64; 16]>;

/// Linear domain-to-range mapping.
///
/// A zero-span domain is accepted and maps every value to `range_start`, so a
/// dataset whose maximum is `0` yields zero-height bars instead of an
/// inverted or NaN scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self::from_finite(
            domain_start,
            domain_end,
            range_start,
            range_end,
        ))
    }

    /// Callers guarantee all bounds are finite.
    pub(crate) const fn from_finite(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> Self {
        Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_end == self.domain_start
    }

    /// Maps a domain value to the range. Non-finite input maps to `range_start`.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Inverse of [`LinearScale::map`]; returns `domain_start` when the mapping
    /// cannot be inverted.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 || self.is_degenerate() || !pixel.is_finite() {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / range_span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round tick values (1, 2 or 5 times a power of ten) covering the domain.
    ///
    /// `count` is a hint; the result holds roughly that many ticks. A
    /// degenerate domain yields its single value.
    #[must_use]
    pub fn ticks(self, count: usize) -> Ticks {
        let mut ticks = Ticks::new();
        if count == 0 {
            return ticks;
        }
        if self.is_degenerate() {
            ticks.push(self.domain_start);
            return ticks;
        }

        let low = self.domain_start.min(self.domain_end);
        let high = self.domain_start.max(self.domain_end);
        let step = tick_step(low, high, count);
        if !step.is_finite() || step <= 0.0 {
            return ticks;
        }

        // Subnormal steps have no finite inverse; multiply instead.
        let inverse = (1.0 / step).round();
        if step >= 1.0 || !inverse.is_finite() {
            let first = (low / step).ceil() as i64;
            let last = (high / step).floor() as i64;
            for index in first..=last {
                if ticks.len() == MAX_TICKS {
                    break;
                }
                ticks.push(index as f64 * step);
            }
        } else {
            // Divide by the inverse step so 0.1 * 3 prints as 0.3.
            let first = (low * inverse).ceil() as i64;
            let last = (high * inverse).floor() as i64;
            for index in first..=last {
                if ticks.len() == MAX_TICKS {
                    break;
                }
                ticks.push(index as f64 / inverse);
            }
        }
        ticks
    }
}

fn tick_step(low: f64, high: f64, count: usize) -> f64 {
    let raw = (high - low) / count as f64;
    let mut step = 10f64.powf(raw.log10().floor());
    let error = raw / step;
    if error >= 50f64.sqrt() {
        step *= 10.0;
    } else if error >= 10f64.sqrt() {
        step *= 5.0;
    } else if error >= 2f64.sqrt() {
        step *= 2.0;
    }
    step
}
