use serde::{Deserialize, Serialize};

use crate::core::ValueRange;
use crate::error::{ChartError, ChartResult};

/// Half span substituted around a single-valued range so the mapping stays
/// finite and the flat line lands in the vertical middle of the plot.
pub const DEGENERATE_HALF_SPAN: f64 = 0.5;

/// Linear value -> pixel mapping for the vertical axis.
///
/// `domain_min` maps to `pixel_bottom` and `domain_max` to `pixel_top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    domain_min: f64,
    domain_max: f64,
    pixel_top: f64,
    pixel_bottom: f64,
}

impl ValueScale {
    pub fn new(range: ValueRange, pixel_top: f64, pixel_bottom: f64) -> ChartResult<Self> {
        if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
            return Err(ChartError::InvalidArgument(format!(
                "value range must be finite with min <= max, got [{}, {}]",
                range.min, range.max
            )));
        }
        if !pixel_top.is_finite() || !pixel_bottom.is_finite() {
            return Err(ChartError::InvalidArgument(
                "value scale pixel bounds must be finite".to_owned(),
            ));
        }

        let (domain_min, domain_max) = if range.is_degenerate() {
            (
                range.min - DEGENERATE_HALF_SPAN,
                range.max + DEGENERATE_HALF_SPAN,
            )
        } else {
            (range.min, range.max)
        };

        Ok(Self {
            domain_min,
            domain_max,
            pixel_top,
            pixel_bottom,
        })
    }

    /// Effective domain, widened when the input range was degenerate.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn pixel_bounds(self) -> (f64, f64) {
        (self.pixel_top, self.pixel_bottom)
    }

    #[must_use]
    pub fn value_to_pixel(self, value: f64) -> f64 {
        let ratio = (self.pixel_bottom - self.pixel_top) / (self.domain_max - self.domain_min);
        self.pixel_bottom - (value - self.domain_min) * ratio
    }

    /// Maps an optional value; `None` stays `None` so gaps survive projection.
    #[must_use]
    pub fn map(self, value: Option<f64>) -> Option<f64> {
        value.map(|value| self.value_to_pixel(value))
    }

    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> f64 {
        let ratio = (self.domain_max - self.domain_min) / (self.pixel_bottom - self.pixel_top);
        self.domain_min + (self.pixel_bottom - pixel) * ratio
    }
}

/// Affine index -> pixel mapping for the horizontal axis of the visible
/// window, plus its clamped inverse used by pointer inspection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexScale {
    pixel_left: f64,
    item_width: f64,
    visible_count: usize,
}

impl IndexScale {
    pub fn new(pixel_left: f64, item_width: f64, visible_count: usize) -> ChartResult<Self> {
        if !pixel_left.is_finite() {
            return Err(ChartError::InvalidArgument(
                "index scale left pixel must be finite".to_owned(),
            ));
        }
        if !item_width.is_finite() || item_width <= 0.0 {
            return Err(ChartError::InvalidArgument(
                "item width must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            pixel_left,
            item_width,
            visible_count,
        })
    }

    #[must_use]
    pub fn index_to_pixel(self, index: usize) -> f64 {
        self.pixel_left + index as f64 * self.item_width
    }

    /// Nearest visible index for a pointer x coordinate.
    ///
    /// Coordinates outside the plotted area clamp to the first/last index.
    /// Returns `None` only when nothing is visible or `pixel` is NaN.
    #[must_use]
    pub fn pixel_to_index(self, pixel: f64) -> Option<usize> {
        if self.visible_count == 0 || pixel.is_nan() {
            return None;
        }

        let last = (self.visible_count - 1) as f64;
        let raw = ((pixel - self.pixel_left) / self.item_width).round();
        Some(raw.clamp(0.0, last) as usize)
    }
}
