mod null_renderer;

pub use null_renderer::NullRenderer;

use crate::api::ChartPoints;
use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive fully projected [`ChartPoints`], so pixel drawing stays
/// isolated from windowing, scaling and interaction logic.
pub trait Renderer {
    fn render(&mut self, points: &ChartPoints) -> ChartResult<()>;
}
