use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{
    Bar, IndexScale, PlotPoint, TimeTick, ValueRange, ValueScale, ValueTick, Viewport,
    VisibleWindow, WindowSelection, select_window, simple_moving_average_by, time_ticks,
    value_ticks,
};
use crate::error::{ChartError, ChartResult};

use super::ChartConfig;

/// Lifecycle phase of a [`ChartState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartPhase {
    Empty,
    Loaded,
    Windowed,
}

/// Immutable chart aggregate. The pipeline swaps in a fresh value on every
/// transition; readers holding an `Arc<ChartState>` keep a consistent view.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    Empty,
    /// Series and moving average are known but no viewport has been sized yet.
    Loaded { series: Arc<SeriesData> },
    Windowed {
        series: Arc<SeriesData>,
        frame: Arc<WindowedFrame>,
    },
}

impl ChartState {
    #[must_use]
    pub fn phase(&self) -> ChartPhase {
        match self {
            Self::Empty => ChartPhase::Empty,
            Self::Loaded { .. } => ChartPhase::Loaded,
            Self::Windowed { .. } => ChartPhase::Windowed,
        }
    }

    #[must_use]
    pub fn series(&self) -> Option<&Arc<SeriesData>> {
        match self {
            Self::Empty => None,
            Self::Loaded { series } | Self::Windowed { series, .. } => Some(series),
        }
    }

    #[must_use]
    pub fn frame(&self) -> Option<&Arc<WindowedFrame>> {
        match self {
            Self::Windowed { frame, .. } => Some(frame),
            _ => None,
        }
    }
}

/// Full series plus its moving average, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    bars: Arc<[Bar]>,
    moving_average_len: usize,
    moving_average: Vec<Option<f64>>,
}

impl SeriesData {
    pub fn new(bars: Arc<[Bar]>, moving_average_len: usize) -> ChartResult<Self> {
        let moving_average =
            simple_moving_average_by(moving_average_len, &bars[..], |bar| bar.close)?;
        Ok(Self {
            bars,
            moving_average_len,
            moving_average,
        })
    }

    /// Recomputes the moving average for a new length, sharing the bars.
    pub fn with_moving_average_len(&self, moving_average_len: usize) -> ChartResult<Self> {
        Self::new(Arc::clone(&self.bars), moving_average_len)
    }

    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    #[must_use]
    pub fn moving_average(&self) -> &[Option<f64>] {
        &self.moving_average
    }

    #[must_use]
    pub fn moving_average_len(&self) -> usize {
        self.moving_average_len
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Pixel geometry derived from the viewport and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub viewport: Viewport,
    pub item_count: usize,
    pub plot_left: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
    /// x of the value axis line.
    pub value_axis_x: f64,
    /// y of the time axis baseline.
    pub time_axis_y: f64,
}

impl PlotLayout {
    pub fn new(viewport: Viewport, config: &ChartConfig) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let margin = config.margin;

        let usable_width = width - margin.left - margin.right;
        let item_count = if usable_width > 0.0 {
            (usable_width / config.item_width_px).floor() as usize
        } else {
            0
        };
        if item_count == 0 {
            return Err(ChartError::InvalidArgument(format!(
                "viewport width {} leaves no room for a {}px item",
                viewport.width, config.item_width_px
            )));
        }

        let plot_top = margin.top;
        let plot_bottom = height - margin.bottom;
        if plot_bottom <= plot_top {
            return Err(ChartError::InvalidArgument(format!(
                "viewport height {} leaves no plot area between margins",
                viewport.height
            )));
        }

        Ok(Self {
            viewport,
            item_count,
            plot_left: margin.left,
            plot_top,
            plot_bottom,
            value_axis_x: width - margin.right,
            time_axis_y: height - margin.top * config.time_axis_top_ratio,
        })
    }
}

/// Everything a renderer needs for one draw pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPoints {
    pub close_points: Vec<PlotPoint>,
    pub moving_average_points: Vec<PlotPoint>,
    pub time_ticks: Vec<TimeTick>,
    pub value_ticks: Vec<ValueTick>,
    pub value_axis_x: f64,
    pub time_axis_y: f64,
}

impl ChartPoints {
    /// Joins consecutive drawable points into `(x1, y1, x2, y2)` segments.
    /// Gap points are skipped, so a line resumes at the next drawable point.
    #[must_use]
    pub fn line_segments(points: &[PlotPoint]) -> Vec<(f64, f64, f64, f64)> {
        let drawable: Vec<(f64, f64)> = points
            .iter()
            .filter_map(|point| point.y.map(|y| (point.x, y)))
            .collect();

        drawable
            .windows(2)
            .map(|pair| (pair[0].0, pair[0].1, pair[1].0, pair[1].1))
            .collect()
    }

    pub fn validate(&self) -> ChartResult<()> {
        let points = self
            .close_points
            .iter()
            .chain(self.moving_average_points.iter());
        for point in points {
            if !point.x.is_finite() || point.y.is_some_and(|y| !y.is_finite()) {
                return Err(ChartError::InvalidData(
                    "plot point coordinates must be finite".to_owned(),
                ));
            }
        }
        if self.time_ticks.iter().any(|tick| !tick.pixel_x.is_finite())
            || self.value_ticks.iter().any(|tick| !tick.pixel_y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "axis tick positions must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.close_points.is_empty()
    }
}

/// Visible slice, scales and projected points for one window position.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedFrame {
    pub layout: PlotLayout,
    pub window: VisibleWindow,
    /// Scroll-back distance the window was derived from, including any
    /// uncommitted drag delta.
    pub effective_offset: usize,
    pub value_range: Option<ValueRange>,
    pub value_scale: Option<ValueScale>,
    pub index_scale: IndexScale,
    pub points: ChartPoints,
}

/// Derives a windowed frame from explicit inputs.
///
/// Returns the frame together with the selection so the caller can decide
/// what offset to commit.
pub fn derive_frame(
    series: &SeriesData,
    layout: PlotLayout,
    config: &ChartConfig,
    offset: usize,
    pending_delta: i64,
    is_final: bool,
) -> ChartResult<(WindowedFrame, WindowSelection)> {
    let selection = select_window(
        series.len(),
        layout.item_count,
        offset,
        pending_delta,
        is_final,
    )?;
    let window = selection.window;

    let bars = window.slice(series.bars());
    let averages = window.slice(series.moving_average());
    let index_scale = IndexScale::new(layout.plot_left, config.item_width_px, bars.len())?;

    let value_range = ValueRange::from_values(
        bars.iter()
            .map(|bar| Some(bar.close))
            .chain(averages.iter().copied()),
    );

    let mut points = ChartPoints {
        value_axis_x: layout.value_axis_x,
        time_axis_y: layout.time_axis_y,
        ..ChartPoints::default()
    };

    let value_scale = match value_range {
        Some(range) => {
            let scale = ValueScale::new(range, layout.plot_top, layout.plot_bottom)?;
            let xs = (0..bars.len()).map(|index| index_scale.index_to_pixel(index));

            points.close_points = xs
                .clone()
                .zip(bars)
                .map(|(x, bar)| PlotPoint::new(x, Some(scale.value_to_pixel(bar.close))))
                .collect();
            points.moving_average_points = xs
                .clone()
                .zip(averages)
                .map(|(x, average)| PlotPoint::new(x, scale.map(*average)))
                .collect();

            let dated: Vec<(f64, chrono::NaiveDate)> =
                xs.zip(bars).map(|(x, bar)| (x, bar.date)).collect();
            points.time_ticks = time_ticks(&dated);
            points.value_ticks = value_ticks(range, config.value_tick_step, scale)?;
            Some(scale)
        }
        None => None,
    };

    let frame = WindowedFrame {
        layout,
        window,
        effective_offset: selection.effective_offset,
        value_range,
        value_scale,
        index_scale,
        points,
    };
    Ok((frame, selection))
}

/// Sorts bars by date, keeps the last bar for duplicated dates and drops
/// bars with a non-finite close.
pub fn canonicalize_bars(mut bars: Vec<Bar>) -> Vec<Bar> {
    let original_len = bars.len();
    bars.retain(|bar| bar.close.is_finite());
    bars.sort_by_key(|bar| bar.date);

    let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
    let mut duplicate_count = 0_usize;
    for bar in bars {
        if let Some(last) = deduped.last_mut() {
            if last.date == bar.date {
                *last = bar;
                duplicate_count += 1;
                continue;
            }
        }
        deduped.push(bar);
    }

    let filtered_count = original_len.saturating_sub(deduped.len() + duplicate_count);
    if filtered_count > 0 || duplicate_count > 0 {
        warn!(
            filtered_count,
            duplicate_count,
            canonical_count = deduped.len(),
            "canonicalized bars on load"
        );
    }
    deduped
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{ChartPoints, PlotLayout, SeriesData, canonicalize_bars, derive_frame};
    use crate::api::ChartConfig;
    use crate::core::{Bar, PlotPoint, Viewport};
    use crate::error::ChartError;

    fn bar(date: &str, close: f64) -> Bar {
        Bar::parse(date, close).expect("valid bar")
    }

    #[test]
    fn layout_uses_margins_and_item_width() {
        let layout = PlotLayout::new(Viewport::new(850, 600), &ChartConfig::default())
            .expect("layout");
        assert_eq!(layout.item_count, 100);
        assert_eq!(layout.plot_top, 40.0);
        assert_eq!(layout.plot_bottom, 560.0);
        assert_eq!(layout.value_axis_x, 810.0);
        assert!((layout.time_axis_y - 572.0).abs() <= 1e-9);
    }

    #[test]
    fn layout_rejects_width_without_items() {
        let err = PlotLayout::new(Viewport::new(50, 600), &ChartConfig::default())
            .expect_err("too narrow");
        assert!(matches!(err, ChartError::InvalidArgument(_)));

        let err = PlotLayout::new(Viewport::new(0, 600), &ChartConfig::default())
            .expect_err("zero width");
        assert!(matches!(err, ChartError::InvalidViewport { .. }));
    }

    #[test]
    fn canonicalize_sorts_and_keeps_last_duplicate() {
        let mut nan_bar = bar("2019-01-04", 1.0);
        nan_bar.close = f64::NAN;
        let bars = canonicalize_bars(vec![
            bar("2019-01-03", 3.0),
            bar("2019-01-02", 2.0),
            nan_bar,
            bar("2019-01-03", 4.0),
        ]);
        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        assert_eq!(closes, vec![2.0, 4.0]);
    }

    #[test]
    fn segments_skip_gaps() {
        let points = [
            PlotPoint::new(0.0, None),
            PlotPoint::new(1.0, Some(5.0)),
            PlotPoint::new(2.0, None),
            PlotPoint::new(3.0, Some(7.0)),
        ];
        assert_eq!(ChartPoints::line_segments(&points), vec![(1.0, 5.0, 3.0, 7.0)]);
    }

    #[test]
    fn frame_over_empty_series_has_no_points() {
        let series = SeriesData::new(Arc::from(Vec::<Bar>::new()), 20).expect("series");
        let config = ChartConfig::default();
        let layout = PlotLayout::new(Viewport::new(850, 600), &config).expect("layout");
        let (frame, selection) = derive_frame(&series, layout, &config, 0, 0, true)
            .expect("frame");
        assert!(frame.points.is_empty());
        assert!(frame.value_range.is_none());
        assert!(selection.window.is_empty());
    }
}
