use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::chart_state::{SeriesData, WindowedFrame};

/// Values under the crosshair for one pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    /// Index within the visible window.
    pub index: usize,
    /// Index within the full series.
    pub series_index: usize,
    pub date: NaiveDate,
    pub close: f64,
    pub moving_average: Option<f64>,
    /// Crosshair x snapped to the inspected item.
    pub pixel_x: f64,
    /// Whether the tooltip should be placed on the left of the crosshair.
    pub on_right: bool,
}

impl Inspection {
    #[must_use]
    pub fn tooltip_text(&self) -> String {
        let moving_average = self
            .moving_average
            .map_or_else(|| "n/a".to_owned(), |value| format!("${value:.2}"));
        format!(
            "date:   {}\nclose:       ${}\nma:          {}",
            self.date.format("%Y-%m-%d"),
            self.close,
            moving_average
        )
    }
}

pub(super) fn inspect_at(
    series: &SeriesData,
    frame: &WindowedFrame,
    pixel_x: f64,
    tooltip_flip_ratio: f64,
) -> Option<Inspection> {
    let index = frame.index_scale.pixel_to_index(pixel_x)?;
    let series_index = frame.window.start + index;
    let bar = series.bars().get(series_index)?;
    let moving_average = series.moving_average().get(series_index).copied().flatten();

    let snapped_x = frame.index_scale.index_to_pixel(index);
    let on_right = f64::from(frame.layout.viewport.width) * tooltip_flip_ratio < snapped_x;

    Some(Inspection {
        index,
        series_index,
        date: bar.date,
        close: bar.close,
        moving_average,
        pixel_x: snapped_x,
        on_right,
    })
}
