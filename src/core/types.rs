use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Raw container box size in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Replaces negative and non-finite extents with `0`.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            width: non_negative_or_zero(self.width),
            height: non_negative_or_zero(self.height),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Pixel inset on each side of the drawing surface reserved for axes/labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const DEFAULT: Self = Self::new(20.0, 20.0, 40.0, 50.0);

    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Defaults with every field present in `partial` replaced.
    #[must_use]
    pub fn merged(partial: PartialMargin) -> Self {
        Self::DEFAULT.with_override(partial)
    }

    /// Field-wise override: a present field always wins over `self`.
    ///
    /// Negative and NaN offsets collapse to `0` so the merged margin stays
    /// non-negative even when the override skipped validation.
    #[must_use]
    pub fn with_override(self, partial: PartialMargin) -> Self {
        Self {
            top: partial.top.map_or(self.top, sanitize_offset),
            right: partial.right.map_or(self.right, sanitize_offset),
            bottom: partial.bottom.map_or(self.bottom, sanitize_offset),
            left: partial.left.map_or(self.left, sanitize_offset),
        }
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Margin override where absent fields keep the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialMargin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl PartialMargin {
    #[must_use]
    pub fn with_top(mut self, top: f64) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub fn with_right(mut self, right: f64) -> Self {
        self.right = Some(right);
        self
    }

    #[must_use]
    pub fn with_bottom(mut self, bottom: f64) -> Self {
        self.bottom = Some(bottom);
        self
    }

    #[must_use]
    pub fn with_left(mut self, left: f64) -> Self {
        self.left = Some(left);
        self
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    pub fn validate(self) -> ChartResult<()> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ChartError::InvalidConfig(format!(
                        "margin `{side}` must be finite and >= 0"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl From<Margin> for PartialMargin {
    fn from(margin: Margin) -> Self {
        Self {
            top: Some(margin.top),
            right: Some(margin.right),
            bottom: Some(margin.bottom),
            left: Some(margin.left),
        }
    }
}

/// Outer container size plus the margin-adjusted drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
}

impl Dimensions {
    /// Inner extents are floored at `0` on each axis independently.
    #[must_use]
    pub fn from_outer(outer: BoxSize, margin: Margin) -> Self {
        let outer = outer.sanitized();
        Self {
            width: outer.width,
            height: outer.height,
            inner_width: (outer.width - margin.horizontal()).max(0.0),
            inner_height: (outer.height - margin.vertical()).max(0.0),
        }
    }

    #[must_use]
    pub fn outer(self) -> BoxSize {
        BoxSize::new(self.width, self.height)
    }

    #[must_use]
    pub fn inner(self) -> BoxSize {
        BoxSize::new(self.inner_width, self.inner_height)
    }
}

fn sanitize_offset(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

fn non_negative_or_zero(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
