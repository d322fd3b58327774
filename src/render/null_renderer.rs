use crate::api::ChartPoints;
use crate::error::ChartResult;
use crate::render::Renderer;

/// No-op renderer used by tests and headless pipeline usage.
///
/// It still validates its input so tests catch non-finite geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_close_segment_count: usize,
    pub last_moving_average_segment_count: usize,
    pub last_tick_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, points: &ChartPoints) -> ChartResult<()> {
        points.validate()?;
        self.render_count += 1;
        self.last_close_segment_count = ChartPoints::line_segments(&points.close_points).len();
        self.last_moving_average_segment_count =
            ChartPoints::line_segments(&points.moving_average_points).len();
        self.last_tick_count = points.time_ticks.len() + points.value_ticks.len();
        Ok(())
    }
}
