pub mod moving_average;
pub mod primitives;
pub mod scale;
pub mod ticks;
pub mod types;
pub mod windowing;

pub use moving_average::{simple_moving_average, simple_moving_average_by};
pub use scale::{DEGENERATE_HALF_SPAN, IndexScale, ValueScale};
pub use ticks::{
    DEFAULT_VALUE_TICK_STEP, MIN_VALUE_TICK_SPACING_PX, TimeTick, TimeTickKind, ValueTick,
    time_ticks, value_ticks,
};
pub use types::{Bar, Margin, PlotPoint, ValueRange, Viewport};
pub use windowing::{VisibleWindow, WindowSelection, max_scroll_offset, select_window};
