use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{ensure_finite, parse_iso_date};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pixel margins between the canvas edge and the plotted area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 40.0,
            bottom: 40.0,
            left: 10.0,
        }
    }
}

/// One daily sample of a price series.
///
/// Only `date` and `close` drive the chart; the remaining OHLC fields are
/// carried through when the source provides them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    pub close: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64) -> ChartResult<Self> {
        Ok(Self {
            date,
            open: None,
            high: None,
            low: None,
            close: ensure_finite(close, "close")?,
        })
    }

    /// Builds a bar from an ISO date string (`YYYY-MM-DD`).
    pub fn parse(date: &str, close: f64) -> ChartResult<Self> {
        Self::new(parse_iso_date(date)?, close)
    }

    /// Attaches the optional open/high/low fields.
    pub fn with_ohlc(mut self, open: f64, high: f64, low: f64) -> ChartResult<Self> {
        self.open = Some(ensure_finite(open, "open")?);
        self.high = Some(ensure_finite(high, "high")?);
        self.low = Some(ensure_finite(low, "low")?);
        Ok(self)
    }
}

/// Inclusive value span of the visible series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Computes min/max over the non-null entries, or `None` when every entry
    /// is null (or the input is empty).
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;

        for value in values.into_iter().flatten() {
            if !value.is_finite() {
                continue;
            }
            min = min.min(value);
            max = max.max(value);
            seen = true;
        }

        seen.then_some(Self { min, max })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.max == self.min
    }
}

/// Projected sample. `y == None` means no mark is drawn at this x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: Option<f64>,
}

impl PlotPoint {
    #[must_use]
    pub fn new(x: f64, y: Option<f64>) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_gap(self) -> bool {
        self.y.is_none()
    }
}
