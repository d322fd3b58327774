use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Half-open index range `[start, end)` over the full series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub start: usize,
    pub end: usize,
}

impl VisibleWindow {
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns the visible part of `items`.
    ///
    /// The window is clamped to `items.len()` so a window computed for a
    /// longer series never panics.
    #[must_use]
    pub fn slice<T>(self, items: &[T]) -> &[T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }
}

/// Result of one window selection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSelection {
    pub window: VisibleWindow,
    /// Scroll-back distance to keep after this pass.
    pub committed_offset: usize,
    /// Scroll-back distance the window was derived from (committed plus the
    /// clamped drag delta).
    pub effective_offset: usize,
}

/// Largest scroll-back distance a drag may reach.
///
/// One item short of `total_len - item_count`, so a released drag always
/// leaves at least one older item outside the window.
#[must_use]
pub fn max_scroll_offset(total_len: usize, item_count: usize) -> usize {
    total_len.saturating_sub(item_count).saturating_sub(1)
}

/// Derives the visible window from a committed scroll offset and a pending
/// drag delta (in items, positive scrolls back in time).
///
/// `offset + pending_delta` is clamped to `[0, max_scroll_offset]`. When
/// `is_final` is set the clamped position becomes the committed offset;
/// otherwise the prior `offset` is echoed back unchanged.
pub fn select_window(
    total_len: usize,
    item_count: usize,
    offset: usize,
    pending_delta: i64,
    is_final: bool,
) -> ChartResult<WindowSelection> {
    if item_count == 0 {
        return Err(ChartError::InvalidArgument(
            "visible item count must be > 0".to_owned(),
        ));
    }

    let max_offset = to_i64(max_scroll_offset(total_len, item_count));
    let target = to_i64(offset).saturating_add(pending_delta).clamp(0, max_offset);
    // `target` is within `[0, max_offset]`, both derived from usize values.
    let effective_offset = target as usize;

    let start = total_len
        .saturating_sub(item_count)
        .saturating_sub(effective_offset);
    let end = start.saturating_add(item_count).min(total_len);

    Ok(WindowSelection {
        window: VisibleWindow { start, end },
        committed_offset: if is_final { effective_offset } else { offset },
        effective_offset,
    })
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
