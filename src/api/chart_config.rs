use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_VALUE_TICK_STEP, Margin};
use crate::error::{ChartError, ChartResult};

/// Public chart configuration.
///
/// Every field has a serde default so hosts can persist a partial JSON
/// document and load it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Horizontal pixels per bar.
    #[serde(default = "default_item_width_px")]
    pub item_width_px: f64,
    #[serde(default = "default_moving_average_len")]
    pub moving_average_len: usize,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default = "default_value_tick_step")]
    pub value_tick_step: f64,
    /// Tooltips flip to the left of the crosshair past `width * ratio`.
    #[serde(default = "default_tooltip_flip_ratio")]
    pub tooltip_flip_ratio: f64,
    /// Time axis baseline sits at `height - margin.top * ratio`.
    #[serde(default = "default_time_axis_top_ratio")]
    pub time_axis_top_ratio: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            item_width_px: default_item_width_px(),
            moving_average_len: default_moving_average_len(),
            margin: Margin::default(),
            value_tick_step: default_value_tick_step(),
            tooltip_flip_ratio: default_tooltip_flip_ratio(),
            time_axis_top_ratio: default_time_axis_top_ratio(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    #[must_use]
    pub fn with_item_width_px(mut self, item_width_px: f64) -> Self {
        self.item_width_px = item_width_px;
        self
    }

    #[must_use]
    pub fn with_moving_average_len(mut self, moving_average_len: usize) -> Self {
        self.moving_average_len = moving_average_len;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_value_tick_step(mut self, value_tick_step: f64) -> Self {
        self.value_tick_step = value_tick_step;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.item_width_px.is_finite() || self.item_width_px <= 0.0 {
            return Err(ChartError::InvalidArgument(
                "item width must be finite and > 0".to_owned(),
            ));
        }
        if self.moving_average_len == 0 {
            return Err(ChartError::InvalidArgument(
                "moving average length must be > 0".to_owned(),
            ));
        }
        if !self.value_tick_step.is_finite() || self.value_tick_step <= 0.0 {
            return Err(ChartError::InvalidArgument(
                "value tick step must be finite and > 0".to_owned(),
            ));
        }

        let margin = self.margin;
        for (name, value) in [
            ("top", margin.top),
            ("right", margin.right),
            ("bottom", margin.bottom),
            ("left", margin.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidArgument(format!(
                    "margin {name} must be finite and >= 0"
                )));
            }
        }

        if !self.tooltip_flip_ratio.is_finite() || !(0.0..=1.0).contains(&self.tooltip_flip_ratio)
        {
            return Err(ChartError::InvalidArgument(
                "tooltip flip ratio must be within [0, 1]".to_owned(),
            ));
        }
        if !self.time_axis_top_ratio.is_finite() || self.time_axis_top_ratio < 0.0 {
            return Err(ChartError::InvalidArgument(
                "time axis top ratio must be finite and >= 0".to_owned(),
            ));
        }

        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}

fn default_symbol() -> String {
    "IBM".to_owned()
}

fn default_item_width_px() -> f64 {
    8.0
}

fn default_moving_average_len() -> usize {
    20
}

fn default_value_tick_step() -> f64 {
    DEFAULT_VALUE_TICK_STEP
}

fn default_tooltip_flip_ratio() -> f64 {
    0.7
}

fn default_time_axis_top_ratio() -> f64 {
    0.7
}
